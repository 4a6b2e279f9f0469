//! Transition command - Apply a transition to an issue

use std::path::Path;

use chrono::Utc;

use crate::errors::Result;
use crate::fs::{append_change, read_issue, read_session, read_workflow, write_issue};
use crate::schemas::ChangeContext;

use super::open_project;

/// Apply `transition` to the issue as `login`, then persist the issue and its
/// change record.
///
/// Nothing is written when the transition fails or in dry-run mode.
pub async fn run(
    cwd: Option<&Path>,
    key: &str,
    transition: &str,
    login: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let project = open_project(cwd)?;
    let session = read_session(&project.root, &project.config, login)?;
    session.check_logged_in()?;
    let acting = session.login().unwrap_or_default().to_string();

    let workflow = read_workflow(&project.root, &project.config)?;
    let mut issue = read_issue(&project.root, &project.config, key)?;

    let change = ChangeContext::manual(acting, Utc::now());
    let record = workflow.do_transition(&mut issue, transition, &change, &session)?;

    if dry_run {
        tracing::info!("[DRY RUN] would move {} to {}", issue.key, issue.status);
    } else {
        write_issue(&project.root, &project.config, key, &issue)?;
        append_change(&project.root, &project.config, &record)?;
    }

    println!("{}: {} -> {}", issue.key, record.transition, issue.status);
    for (field, diff) in record.diffs.iter() {
        println!(
            "  {}: {} -> {}",
            field,
            diff.old.as_deref().unwrap_or("null"),
            diff.new.as_deref().unwrap_or("null")
        );
    }
    Ok(())
}
