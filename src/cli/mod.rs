//! CLI module for issueflow
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Issueflow - Move tracked issues through a permission-gated workflow
#[derive(Parser, Debug)]
#[command(name = "issueflow")]
#[command(version)]
#[command(about = "Move tracked issues through a permission-gated workflow")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview operations without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an .issueflow directory in the current directory
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// List issues with optional filtering
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by status (open, confirmed, reopened, resolved, closed)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show details of a specific issue
    Show {
        /// Issue key
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the transitions a user may apply to an issue
    Transitions {
        /// Issue key
        key: String,

        /// Act as this login (anonymous when omitted)
        #[arg(long = "as")]
        login: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a transition to an issue
    Transition {
        /// Issue key
        key: String,

        /// Transition key (e.g. confirm, resolve-fixed, close, reopen)
        transition: String,

        /// Act as this login (anonymous when omitted)
        #[arg(long = "as")]
        login: Option<String>,
    },

    /// Print the workflow transition table
    Workflow {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a user holds a permission
    Check {
        /// Permission key (admin, issueadmin, user, codeviewer, scan, provisioning)
        permission: String,

        /// Act as this login (anonymous when omitted)
        #[arg(long = "as")]
        login: Option<String>,

        /// Check on the project owning this component instead of globally
        #[arg(long)]
        component: Option<String>,
    },
}
