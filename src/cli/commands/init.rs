//! Init command - Create the .issueflow layout

use std::path::Path;

use crate::errors::{IssueflowError, Result};
use crate::fs::{get_config_path, get_issues_dir, get_sessions_dir, resolve_cwd, write_json};
use crate::schemas::Config;

/// Initialize an .issueflow directory with the default configuration
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let config_path = get_config_path(&root);

    if config_path.exists() && !force {
        return Err(IssueflowError::ConfigError(format!(
            "{} already exists; use --force to overwrite",
            config_path.display()
        )));
    }

    let config = Config::default();
    if dry_run {
        tracing::info!("[DRY RUN] would write {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(get_issues_dir(&root, &config))?;
    std::fs::create_dir_all(get_sessions_dir(&root, &config))?;
    write_json(&config_path, &config)?;

    println!("Initialized issueflow in {}", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, false).await.unwrap();

        assert!(temp.path().join(".issueflow/config.json").exists());
        assert!(temp.path().join(".issueflow/issues").is_dir());
        assert!(temp.path().join(".issueflow/sessions").is_dir());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, false).await.unwrap();

        let err = run(Some(temp.path()), false, false).await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(run(Some(temp.path()), true, false).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, true).await.unwrap();
        assert!(!temp.path().join(".issueflow").exists());
    }
}
