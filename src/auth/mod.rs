//! Authorization for issueflow
//!
//! Permission keys plus the per-request [`UserSession`] snapshot that every
//! mutation consults before acting.

mod permission;
mod session;

pub use permission::Permission;
pub use session::UserSession;
