//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::UserSession;
use crate::domain::{default_workflow, Transition, Workflow};
use crate::errors::{IssueflowError, Result};
use crate::schemas::{Config, Issue, IssueChange};

use super::paths::{
    get_changes_path, get_config_path, get_issue_path, get_issues_dir, get_session_path,
    get_workflow_path,
};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IssueflowError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            IssueflowError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        IssueflowError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| IssueflowError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file, or defaults if it doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Read one issue by key.
///
/// # Errors
/// * `InvalidIssueState` - If the stored issue carries a different key
pub fn read_issue(root: &Path, config: &Config, key: &str) -> Result<Issue> {
    let issue: Issue = read_json(&get_issue_path(root, config, key)?)?;
    check_issue_key(key, &issue)?;
    Ok(issue)
}

/// Write an issue to the file of `key`.
///
/// # Errors
/// * `InvalidIssueState` - If the issue carries a different key
pub fn write_issue(root: &Path, config: &Config, key: &str, issue: &Issue) -> Result<()> {
    check_issue_key(key, issue)?;
    write_json(&get_issue_path(root, config, key)?, issue)
}

fn check_issue_key(key: &str, issue: &Issue) -> Result<()> {
    if issue.key != key {
        return Err(IssueflowError::InvalidIssueState(format!(
            "issue file '{}' holds issue '{}'",
            key, issue.key
        )));
    }
    Ok(())
}

/// Read every issue in the issues directory, sorted by key.
///
/// A missing directory yields no issues.
pub fn list_issues(root: &Path, config: &Config) -> Result<Vec<Issue>> {
    let dir = get_issues_dir(root, config);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut issues = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !name.ends_with(".json") || name.ends_with(".changes.json") {
            continue;
        }
        issues.push(read_json::<Issue>(&path)?);
    }
    issues.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(issues)
}

/// Append a change record to the issue's change log.
pub fn append_change(root: &Path, config: &Config, change: &IssueChange) -> Result<()> {
    let path = get_changes_path(root, config, &change.issue_key)?;
    let mut changes: Vec<IssueChange> = if path.exists() {
        read_json(&path)?
    } else {
        Vec::new()
    };
    changes.push(change.clone());
    write_json(&path, &changes)
}

/// Read the change log of an issue; empty when none was written yet.
pub fn read_changes(root: &Path, config: &Config, key: &str) -> Result<Vec<IssueChange>> {
    let path = get_changes_path(root, config, key)?;
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(&path)
}

/// Load the session snapshot for `login`, or an anonymous session.
pub fn read_session(root: &Path, config: &Config, login: Option<&str>) -> Result<UserSession> {
    match login {
        None => Ok(UserSession::anonymous()),
        Some(login) => {
            let session: UserSession = read_json(&get_session_path(root, config, login)?)?;
            if session.login() != Some(login) {
                return Err(IssueflowError::ConfigError(format!(
                    "session file for '{}' belongs to {:?}",
                    login,
                    session.login()
                )));
            }
            Ok(session)
        }
    }
}

/// Load the configured workflow, falling back to the built-in one.
pub fn read_workflow(root: &Path, config: &Config) -> Result<Workflow> {
    match get_workflow_path(root, config) {
        Some(path) => {
            let transitions: Vec<Transition> = read_json(&path)?;
            Workflow::from_transitions(transitions)
        }
        None => default_workflow(),
    }
}
