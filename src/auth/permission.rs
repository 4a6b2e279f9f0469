//! Permission keys

use serde::{Deserialize, Serialize};

/// A permission that can be granted globally or on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Administer the instance (global) or a project
    Admin,
    /// Change issue resolutions that hide problems (false positive, won't fix)
    #[serde(rename = "issueadmin")]
    IssueAdmin,
    /// Browse a project and act on its issues
    User,
    /// See source code of a project
    #[serde(rename = "codeviewer")]
    CodeViewer,
    /// Push analysis results
    Scan,
    /// Create projects
    Provisioning,
}

impl Permission {
    pub fn key(&self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::IssueAdmin => "issueadmin",
            Permission::User => "user",
            Permission::CodeViewer => "codeviewer",
            Permission::Scan => "scan",
            Permission::Provisioning => "provisioning",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Permission::Admin),
            "issueadmin" => Ok(Permission::IssueAdmin),
            "user" => Ok(Permission::User),
            "codeviewer" => Ok(Permission::CodeViewer),
            "scan" => Ok(Permission::Scan),
            "provisioning" => Ok(Permission::Provisioning),
            _ => Err(format!("Unknown permission: {}", s)),
        }
    }
}
