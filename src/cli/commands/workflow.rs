//! Workflow command - Print the transition table

use std::path::Path;

use crate::errors::{IssueflowError, Result};
use crate::fs::read_workflow;

use super::open_project;

/// Print the configured workflow, grouped by source status
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let project = open_project(cwd)?;
    let workflow = read_workflow(&project.root, &project.config)?;

    if json {
        let transitions: Vec<_> = workflow.transitions().collect();
        let out = serde_json::to_string_pretty(&transitions)
            .map_err(|e| IssueflowError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    for status in workflow.statuses() {
        let marker = if workflow.is_terminal(status) { " (terminal)" } else { "" };
        println!("{}{}", status, marker);
        for transition in workflow.outgoing(status) {
            let guard: Vec<String> = transition.conditions().iter().map(|c| c.to_string()).collect();
            let functions: Vec<String> = transition.functions().iter().map(|f| f.to_string()).collect();
            println!(
                "  {:<16} -> {:<10}{} when [{}] do [{}]",
                transition.key(),
                transition.to(),
                if transition.is_automatic() { " auto" } else { "" },
                guard.join(", "),
                functions.join(", ")
            );
        }
    }
    Ok(())
}
