//! Schema types for issueflow
//!
//! Plain data carried in and out of the workflow engine.

mod change;
mod config;
mod issue;

pub use change::{ChangeContext, ChangeSource, FieldDiff, FieldDiffs, IssueChange};
pub use config::Config;
pub use issue::{Issue, IssueStatus, Resolution};
