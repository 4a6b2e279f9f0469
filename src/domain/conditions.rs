//! Transition guards

use serde::{Deserialize, Serialize};

use crate::auth::{Permission, UserSession};
use crate::schemas::{Issue, Resolution};

/// A predicate over the issue and the acting session.
///
/// A transition is available only when all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Condition {
    /// Principal holds the permission on the project owning the issue
    HasProjectPermission(Permission),
    /// Principal holds the permission globally
    HasGlobalPermission(Permission),
    /// Some principal is authenticated
    IsLoggedIn,
    /// Issue resolution is one of the listed values
    HasResolution(Vec<Resolution>),
    /// Issue has no resolution
    IsUnresolved,
    /// Analysis flagged the issue as gone
    IsBeingClosed,
    /// Negation of the inner condition
    Not(Box<Condition>),
}

impl Condition {
    pub fn matches(&self, issue: &Issue, session: &UserSession) -> bool {
        match self {
            Condition::HasProjectPermission(permission) => {
                session.has_permission(*permission, Some(&issue.component))
            }
            Condition::HasGlobalPermission(permission) => session.has_permission(*permission, None),
            Condition::IsLoggedIn => session.is_logged_in(),
            Condition::HasResolution(resolutions) => issue
                .resolution
                .is_some_and(|r| resolutions.contains(&r)),
            Condition::IsUnresolved => issue.is_unresolved(),
            Condition::IsBeingClosed => issue.being_closed,
            Condition::Not(inner) => !inner.matches(issue, session),
        }
    }

    /// Negate a condition
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::HasProjectPermission(p) => write!(f, "project permission '{}'", p),
            Condition::HasGlobalPermission(p) => write!(f, "global permission '{}'", p),
            Condition::IsLoggedIn => write!(f, "logged in"),
            Condition::HasResolution(resolutions) => {
                let names: Vec<&str> = resolutions.iter().map(|r| r.as_str()).collect();
                write!(f, "resolution in [{}]", names.join(", "))
            }
            Condition::IsUnresolved => write!(f, "unresolved"),
            Condition::IsBeingClosed => write!(f, "being closed"),
            Condition::Not(inner) => write!(f, "not {}", inner),
        }
    }
}
