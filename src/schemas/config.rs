//! Config schema - Configuration for issueflow

use serde::{Deserialize, Serialize};

/// Main configuration for issueflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// JSON transition table, relative to .issueflow (built-in workflow when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_file: Option<String>,

    /// Directory holding issue files, relative to .issueflow
    #[serde(default = "default_issues_dir")]
    pub issues_dir: String,

    /// Directory holding session snapshots, relative to .issueflow
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_issues_dir() -> String {
    "issues".to_string()
}

fn default_sessions_dir() -> String {
    "sessions".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            workflow_file: None,
            issues_dir: "issues".to_string(),
            sessions_dir: "sessions".to_string(),
        }
    }
}
