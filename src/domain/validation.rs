//! Issue invariants checked after a transition has run

use crate::errors::{IssueflowError, Result};
use crate::schemas::{Issue, IssueStatus};

/// Validate the status-dependent invariants of an issue.
///
/// - CLOSED requires a close date and a resolution
/// - RESOLVED requires a resolution
/// - any other status forbids a close date
///
/// # Errors
/// * `InvalidIssueState` - naming the first violated invariant
pub fn validate_issue(issue: &Issue) -> Result<()> {
    match issue.status {
        IssueStatus::Closed => {
            if issue.close_date.is_none() {
                return Err(invalid(issue, "a closed issue must have a close date"));
            }
            if issue.resolution.is_none() {
                return Err(invalid(issue, "a closed issue must have a resolution"));
            }
        }
        IssueStatus::Resolved => {
            if issue.resolution.is_none() {
                return Err(invalid(issue, "a resolved issue must have a resolution"));
            }
        }
        _ => {}
    }

    if issue.status != IssueStatus::Closed && issue.close_date.is_some() {
        return Err(invalid(
            issue,
            &format!("a {} issue must not keep a close date", issue.status),
        ));
    }

    Ok(())
}

fn invalid(issue: &Issue, reason: &str) -> IssueflowError {
    IssueflowError::InvalidIssueState(format!("issue {}: {}", issue.key, reason))
}
