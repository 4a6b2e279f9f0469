//! CLI command implementations

pub mod check;
pub mod init;
pub mod list;
pub mod show;
pub mod transition;
pub mod transitions;
pub mod workflow;

use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::errors::Result;
use crate::fs::{find_project_root, resolve_cwd};
use crate::schemas::Config;

/// An opened .issueflow project
pub(crate) struct Project {
    pub root: PathBuf,
    pub config: Config,
}

/// Locate the project from the working directory and load its config
pub(crate) fn open_project(cwd: Option<&Path>) -> Result<Project> {
    let root = find_project_root(&resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    Ok(Project { root, config })
}
