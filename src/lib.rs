//! Issueflow - An issue transition workflow engine
//!
//! This library provides:
//! - Schema definitions for issues, change contexts and field diffs
//! - Authorization sessions with global, per-project and root permissions
//! - Domain logic for transitions, guards, transition functions and the
//!   workflow state machine
//! - File system and configuration glue used by the CLI

pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;

// Re-export commonly used types
pub use auth::{Permission, UserSession};
pub use domain::{Transition, TransitionFunction, Workflow};
pub use errors::{IssueflowError, Result};
pub use schemas::{ChangeContext, Issue, IssueChange, IssueStatus, Resolution};
