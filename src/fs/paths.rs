//! Path resolution utilities for issueflow
//!
//! Provides functions to locate the project root and construct paths
//! to the issueflow files and directories.

use std::path::{Path, PathBuf};

use crate::errors::{IssueflowError, Result};
use crate::schemas::Config;

/// Find the project root containing an .issueflow directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `ProjectNotFound` - If no .issueflow directory is found
pub fn find_project_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| IssueflowError::ProjectNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if get_issueflow_dir(&current).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(IssueflowError::ProjectNotFound(
                    "Could not find an .issueflow directory; run `issueflow init`".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .issueflow directory.
pub fn get_issueflow_dir(root: &Path) -> PathBuf {
    root.join(".issueflow")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_issueflow_dir(root).join("config.json")
}

/// Get the path to the issues directory.
pub fn get_issues_dir(root: &Path, config: &Config) -> PathBuf {
    get_issueflow_dir(root).join(&config.issues_dir)
}

/// Check that `name` can be used as a single file name under an issueflow
/// directory.
///
/// # Errors
/// * `ConfigError` - If the name is empty, `.`/`..`, or holds a path separator
pub fn validate_file_stem(kind: &str, name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| c == '/' || c == '\\' || c == '\0')
    {
        return Err(IssueflowError::ConfigError(format!(
            "{} must be a plain file name, got '{}'",
            kind, name
        )));
    }
    Ok(())
}

/// Get the path to an issue's JSON file.
pub fn get_issue_path(root: &Path, config: &Config, key: &str) -> Result<PathBuf> {
    validate_file_stem("issue key", key)?;
    Ok(get_issues_dir(root, config).join(format!("{}.json", key)))
}

/// Get the path to an issue's change log.
pub fn get_changes_path(root: &Path, config: &Config, key: &str) -> Result<PathBuf> {
    validate_file_stem("issue key", key)?;
    Ok(get_issues_dir(root, config).join(format!("{}.changes.json", key)))
}

/// Get the path to the sessions directory.
pub fn get_sessions_dir(root: &Path, config: &Config) -> PathBuf {
    get_issueflow_dir(root).join(&config.sessions_dir)
}

/// Get the path to a user's session snapshot.
pub fn get_session_path(root: &Path, config: &Config, login: &str) -> Result<PathBuf> {
    validate_file_stem("login", login)?;
    Ok(get_sessions_dir(root, config).join(format!("{}.json", login)))
}

/// Get the path to a custom workflow definition, if one is configured.
pub fn get_workflow_path(root: &Path, config: &Config) -> Option<PathBuf> {
    config
        .workflow_file
        .as_ref()
        .map(|file| get_issueflow_dir(root).join(file))
}
