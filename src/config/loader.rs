//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{IssueflowError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the project, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `ConfigError` - If a configured directory or file escapes .issueflow
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    let mut entries = vec![
        ("issues_dir", config.issues_dir.as_str()),
        ("sessions_dir", config.sessions_dir.as_str()),
    ];
    if let Some(file) = &config.workflow_file {
        entries.push(("workflow_file", file.as_str()));
    }

    for (name, value) in entries {
        let path = Path::new(value);
        if value.is_empty() || path.is_absolute() || value.split(|c: char| c == '/' || c == '\\').any(|c| c == "..") {
            return Err(IssueflowError::ConfigError(format!(
                "{} must be a relative path inside .issueflow, got '{}'",
                name, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let temp = TempDir::new().unwrap();
        std_fs::create_dir(temp.path().join(".issueflow")).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.issues_dir, "issues");
        assert_eq!(config.sessions_dir, "sessions");
        assert!(config.workflow_file.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".issueflow");
        std_fs::create_dir(&dir).unwrap();

        let config_content = r#"{
            "workflow_file": "workflow.json",
            "issues_dir": "data/issues"
        }"#;
        std_fs::write(dir.join("config.json"), config_content).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.workflow_file.as_deref(), Some("workflow.json"));
        assert_eq!(config.issues_dir, "data/issues");
        // Default for unspecified field
        assert_eq!(config.sessions_dir, "sessions");
    }

    #[test]
    fn test_load_config_rejects_escaping_paths() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".issueflow");
        std_fs::create_dir(&dir).unwrap();
        std_fs::write(dir.join("config.json"), r#"{"sessions_dir": "../elsewhere"}"#).unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("sessions_dir"));
    }
}
