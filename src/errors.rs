//! Error types for issueflow
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Domain errors additionally map to the HTTP status the web layer reports.

use thiserror::Error;

use crate::schemas::IssueStatus;

/// Result type alias for issueflow operations
pub type Result<T> = std::result::Result<T, IssueflowError>;

/// Main error type for all issueflow operations
#[derive(Debug, Error)]
pub enum IssueflowError {
    /// No principal is present but the operation requires one
    #[error("Authentication is required: {0}")]
    Unauthenticated(String),

    /// Principal is present but lacks the required permission
    #[error("Insufficient privileges: {0}")]
    Forbidden(String),

    /// Requested transition is not currently legal for the issue
    #[error("Transition '{key}' is not available from status {status}")]
    IllegalTransition { key: String, status: IssueStatus },

    /// A mutation would violate an issue invariant
    #[error("Invalid issue state: {0}")]
    InvalidIssueState(String),

    /// Transition table is malformed (duplicate or invalid keys)
    #[error("Invalid workflow definition: {0}")]
    WorkflowDefinition(String),

    /// No .issueflow directory found
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl IssueflowError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            IssueflowError::Unauthenticated(_) => "UNAUTHENTICATED",
            IssueflowError::Forbidden(_) => "FORBIDDEN",
            IssueflowError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            IssueflowError::InvalidIssueState(_) => "INVALID_ISSUE_STATE",
            IssueflowError::WorkflowDefinition(_) => "WORKFLOW_DEFINITION",
            IssueflowError::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            IssueflowError::InvalidJson(_) => "INVALID_JSON",
            IssueflowError::FileNotFound(_) => "FILE_NOT_FOUND",
            IssueflowError::ConfigError(_) => "CONFIG_ERROR",
            IssueflowError::Io(_) => "IO_ERROR",
            IssueflowError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// HTTP status the web layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            IssueflowError::Unauthenticated(_) => 401,
            IssueflowError::Forbidden(_) => 403,
            IssueflowError::IllegalTransition { .. } | IssueflowError::InvalidIssueState(_) => 400,
            IssueflowError::FileNotFound(_) | IssueflowError::ProjectNotFound(_) => 404,
            _ => 500,
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        IssueflowError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &IssueflowError) -> i32 {
    match error {
        IssueflowError::Unauthenticated(_) | IssueflowError::Forbidden(_) => 77, // EX_NOPERM
        IssueflowError::IllegalTransition { .. } | IssueflowError::InvalidIssueState(_) => 65, // EX_DATAERR
        _ => 1,
    }
}
