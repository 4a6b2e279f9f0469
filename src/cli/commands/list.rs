//! List command - List issues with optional status filter

use std::path::Path;

use crate::errors::{IssueflowError, Result};
use crate::fs::list_issues;
use crate::schemas::IssueStatus;

use super::open_project;

/// List issues, optionally filtered by status
pub async fn run(cwd: Option<&Path>, json: bool, status: Option<&str>) -> Result<()> {
    let project = open_project(cwd)?;
    let status = status
        .map(|s| s.parse::<IssueStatus>())
        .transpose()
        .map_err(|e| IssueflowError::wrap(e, "Invalid --status"))?;

    let issues: Vec<_> = list_issues(&project.root, &project.config)?
        .into_iter()
        .filter(|issue| status.map_or(true, |s| issue.status == s))
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&issues)
            .map_err(|e| IssueflowError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues");
        return Ok(());
    }
    for issue in &issues {
        println!(
            "{:<16} {:<10} {:<15} {:<12} {}",
            issue.key,
            issue.status,
            issue.resolution.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
            issue.assignee.as_deref().unwrap_or("-"),
            issue.component
        );
    }
    Ok(())
}
