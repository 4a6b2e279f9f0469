//! Issue status sets
//!
//! The status enumeration itself is fixed; which statuses are terminal is a
//! property of a [`Workflow`](super::Workflow), not of this module.

use crate::schemas::IssueStatus;

/// Every issue status, in lifecycle order.
///
/// OPEN is the implicit initial status of new issues.
pub const ISSUE_STATUSES: &[IssueStatus] = &[
    IssueStatus::Open,
    IssueStatus::Confirmed,
    IssueStatus::Reopened,
    IssueStatus::Resolved,
    IssueStatus::Closed,
];

/// Statuses in which an issue still needs work and carries no resolution.
pub const UNRESOLVED_STATUSES: &[IssueStatus] = &[
    IssueStatus::Open,
    IssueStatus::Confirmed,
    IssueStatus::Reopened,
];

/// Check if a status belongs to the unresolved set.
pub fn is_unresolved_status(status: IssueStatus) -> bool {
    UNRESOLVED_STATUSES.contains(&status)
}
