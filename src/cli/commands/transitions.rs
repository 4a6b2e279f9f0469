//! Transitions command - List the transitions available to a user

use std::path::Path;

use serde::Serialize;

use crate::domain::Transition;
use crate::errors::{IssueflowError, Result};
use crate::fs::{read_issue, read_session, read_workflow};

use super::open_project;

#[derive(Serialize)]
struct AvailableTransition<'a> {
    key: &'a str,
    to: String,
}

/// List the transitions `login` may apply to the issue right now
pub async fn run(cwd: Option<&Path>, key: &str, login: Option<&str>, json: bool) -> Result<()> {
    let project = open_project(cwd)?;
    let issue = read_issue(&project.root, &project.config, key)?;
    let session = read_session(&project.root, &project.config, login)?;
    let workflow = read_workflow(&project.root, &project.config)?;

    let available: Vec<&Transition> = workflow.available_transitions(&issue, &session).collect();

    if json {
        let entries: Vec<AvailableTransition<'_>> = available
            .iter()
            .map(|t| AvailableTransition {
                key: t.key(),
                to: t.to().to_string(),
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| IssueflowError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if available.is_empty() {
        println!("No transitions available for {} ({})", issue.key, issue.status);
        return Ok(());
    }
    for transition in available {
        println!("{:<16} -> {}", transition.key(), transition.to());
    }
    Ok(())
}
