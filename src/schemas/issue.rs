//! Issue schema - The tracked defect moved through the workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    /// Initial status of every new issue
    Open,
    /// Acknowledged by someone with access to the project
    Confirmed,
    /// Sent back to work after being resolved or closed
    Reopened,
    /// Resolved by a user, carries a resolution
    Resolved,
    /// Closed, carries a resolution and a close date
    Closed,
}

impl IssueStatus {
    /// Canonical string form, also used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Confirmed => "CONFIRMED",
            IssueStatus::Reopened => "REOPENED",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(IssueStatus::Open),
            "CONFIRMED" => Ok(IssueStatus::Confirmed),
            "REOPENED" => Ok(IssueStatus::Reopened),
            "RESOLVED" => Ok(IssueStatus::Resolved),
            "CLOSED" => Ok(IssueStatus::Closed),
            _ => Err(format!("Unknown issue status: {}", s)),
        }
    }
}

/// Resolution of a resolved or closed issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "FALSE-POSITIVE")]
    FalsePositive,
    #[serde(rename = "WONTFIX")]
    WontFix,
    #[serde(rename = "REMOVED")]
    Removed,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Fixed => "FIXED",
            Resolution::FalsePositive => "FALSE-POSITIVE",
            Resolution::WontFix => "WONTFIX",
            Resolution::Removed => "REMOVED",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIXED" => Ok(Resolution::Fixed),
            "FALSE-POSITIVE" => Ok(Resolution::FalsePositive),
            "WONTFIX" => Ok(Resolution::WontFix),
            "REMOVED" => Ok(Resolution::Removed),
            _ => Err(format!("Unknown resolution: {}", s)),
        }
    }
}

/// A tracked defect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for the issue
    pub key: String,

    /// Key of the component (file, module or project) the issue belongs to
    pub component: String,

    /// Current lifecycle status
    pub status: IssueStatus,

    /// Resolution, set while RESOLVED or CLOSED
    #[serde(default)]
    pub resolution: Option<Resolution>,

    /// Login of the assigned user
    #[serde(default)]
    pub assignee: Option<String>,

    /// 1-based line the issue points at
    #[serde(default)]
    pub line: Option<u32>,

    /// Set while the issue is CLOSED
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Marked by analysis when the underlying problem disappeared
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub being_closed: bool,
}

impl Issue {
    /// Create a new OPEN issue on the given component
    pub fn new(key: impl Into<String>, component: impl Into<String>) -> Self {
        Issue {
            key: key.into(),
            component: component.into(),
            status: IssueStatus::Open,
            resolution: None,
            assignee: None,
            line: None,
            close_date: None,
            message: None,
            being_closed: false,
        }
    }

    /// Return the issue with the given status
    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    /// Return the issue with the given resolution
    pub fn with_resolution(mut self, resolution: Option<Resolution>) -> Self {
        self.resolution = resolution;
        self
    }

    /// Return the issue with the given assignee
    pub fn with_assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = assignee;
        self
    }

    /// Return the issue with the given line
    pub fn with_line(mut self, line: Option<u32>) -> Self {
        self.line = line;
        self
    }

    /// Return the issue with the given close date
    pub fn with_close_date(mut self, close_date: Option<DateTime<Utc>>) -> Self {
        self.close_date = close_date;
        self
    }

    /// Return the issue with the given message
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Return the issue flagged (or not) as being closed by analysis
    pub fn with_being_closed(mut self, being_closed: bool) -> Self {
        self.being_closed = being_closed;
        self
    }

    /// True when the issue carries no resolution
    pub fn is_unresolved(&self) -> bool {
        self.resolution.is_none()
    }
}
