//! Show command - Show details of a specific issue

use std::path::Path;

use crate::errors::{IssueflowError, Result};
use crate::fs::{read_changes, read_issue};

use super::open_project;

/// Show details and change history of a specific issue
pub async fn run(cwd: Option<&Path>, key: &str, json: bool) -> Result<()> {
    let project = open_project(cwd)?;
    let issue = read_issue(&project.root, &project.config, key)?;

    if json {
        let out = serde_json::to_string_pretty(&issue)
            .map_err(|e| IssueflowError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Issue:      {}", issue.key);
    println!("Component:  {}", issue.component);
    println!("Status:     {}", issue.status);
    if let Some(resolution) = issue.resolution {
        println!("Resolution: {}", resolution);
    }
    if let Some(assignee) = &issue.assignee {
        println!("Assignee:   {}", assignee);
    }
    if let Some(line) = issue.line {
        println!("Line:       {}", line);
    }
    if let Some(close_date) = issue.close_date {
        println!("Closed:     {}", close_date.to_rfc3339());
    }
    if let Some(message) = &issue.message {
        println!("Message:    {}", message);
    }

    let changes = read_changes(&project.root, &project.config, key)?;
    if !changes.is_empty() {
        println!();
        println!("History:");
        for change in &changes {
            println!(
                "  {} {} by {}",
                change.date.to_rfc3339(),
                change.transition,
                change.login.as_deref().unwrap_or("<scan>")
            );
            for (field, diff) in change.diffs.iter() {
                println!(
                    "      {}: {} -> {}",
                    field,
                    diff.old.as_deref().unwrap_or("null"),
                    diff.new.as_deref().unwrap_or("null")
                );
            }
        }
    }
    Ok(())
}
