//! File system utilities for issueflow
//!
//! Provides path resolution and JSON file operations. The workflow engine
//! itself never touches the file system; this is glue for the CLI.

mod json;
mod paths;

pub use json::{
    append_change, list_issues, read_changes, read_config, read_issue, read_json, read_session,
    read_workflow, write_issue, write_json,
};
pub use paths::{
    find_project_root, get_changes_path, get_config_path, get_issue_path, get_issueflow_dir,
    get_issues_dir, get_session_path, get_sessions_dir, get_workflow_path, resolve_cwd,
    validate_file_stem,
};
