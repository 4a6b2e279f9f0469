//! Check command - Verify a permission for a user

use std::path::Path;

use crate::auth::Permission;
use crate::errors::{IssueflowError, Result};
use crate::fs::read_session;

use super::open_project;

/// Fail unless `login` holds `permission`, globally or on `component`'s project
pub async fn run(
    cwd: Option<&Path>,
    permission: &str,
    login: Option<&str>,
    component: Option<&str>,
) -> Result<()> {
    let permission: Permission = permission
        .parse()
        .map_err(|e: String| IssueflowError::wrap(e, "Invalid permission"))?;
    let project = open_project(cwd)?;
    let session = read_session(&project.root, &project.config, login)?;

    session.check_permission(permission, component)?;

    match component {
        Some(component) => println!("granted: {} on {}", permission, component),
        None => println!("granted: {}", permission),
    }
    Ok(())
}
