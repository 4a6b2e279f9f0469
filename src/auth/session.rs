//! Per-request authorization snapshot
//!
//! A [`UserSession`] captures everything needed to answer "may this principal
//! do X here?" without touching storage: the login, the root flag, global
//! grants, per-project grants and the component → project mapping for the
//! components the request touches.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Permission;
use crate::errors::{IssueflowError, Result};

/// Capability snapshot of the principal behind one request.
///
/// Built per request, queried by transition guards and other authorization
/// checks, then dropped. Never shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(default)]
    login: Option<String>,

    #[serde(default)]
    root: bool,

    #[serde(default)]
    global_permissions: BTreeSet<Permission>,

    /// Project key → permissions granted on that project
    #[serde(default)]
    project_permissions: BTreeMap<String, BTreeSet<Permission>>,

    /// Component key → owning top-level project key
    #[serde(default)]
    components: BTreeMap<String, String>,
}

impl UserSession {
    /// Session with no principal
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session of an authenticated user with no grants yet
    pub fn logged_in(login: impl Into<String>) -> Self {
        UserSession {
            login: Some(login.into()),
            ..Self::default()
        }
    }

    /// Mark the principal as root
    pub fn with_root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn with_global_permission(mut self, permission: Permission) -> Self {
        self.global_permissions.insert(permission);
        self
    }

    pub fn with_project_permission(mut self, project: impl Into<String>, permission: Permission) -> Self {
        self.project_permissions
            .entry(project.into())
            .or_default()
            .insert(permission);
        self
    }

    /// Register `component` as belonging to the top-level `project`
    pub fn with_component(mut self, component: impl Into<String>, project: impl Into<String>) -> Self {
        self.components.insert(component.into(), project.into());
        self
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Resolve a component to its owning top-level project.
    ///
    /// A project the session holds grants on resolves to itself. Unknown
    /// components resolve to nothing.
    pub fn project_for<'a>(&'a self, component: &'a str) -> Option<&'a str> {
        if let Some(project) = self.components.get(component) {
            return Some(project.as_str());
        }
        if self.project_permissions.contains_key(component) {
            return Some(component);
        }
        None
    }

    /// Whether the principal holds `permission`, globally when `scope` is
    /// `None`, otherwise on the project owning the `scope` component.
    ///
    /// Root holds every permission everywhere.
    pub fn has_permission(&self, permission: Permission, scope: Option<&str>) -> bool {
        if self.root {
            return true;
        }
        match scope {
            None => self.global_permissions.contains(&permission),
            Some(component) => self
                .project_for(component)
                .and_then(|project| self.project_permissions.get(project))
                .is_some_and(|granted| granted.contains(&permission)),
        }
    }

    /// Same as [`has_permission`](Self::has_permission) but fails with
    /// `Unauthenticated` for anonymous sessions and `Forbidden` otherwise.
    pub fn check_permission(&self, permission: Permission, scope: Option<&str>) -> Result<&Self> {
        if self.has_permission(permission, scope) {
            return Ok(self);
        }
        let required = match scope {
            Some(component) => format!("'{}' permission on {}", permission, component),
            None => format!("global '{}' permission", permission),
        };
        if !self.is_logged_in() {
            return Err(IssueflowError::Unauthenticated(required));
        }
        Err(IssueflowError::Forbidden(required))
    }

    pub fn check_logged_in(&self) -> Result<&Self> {
        if !self.is_logged_in() {
            return Err(IssueflowError::Unauthenticated("no user is logged in".to_string()));
        }
        Ok(self)
    }

    /// Root, or holder of the global admin permission
    pub fn is_system_administrator(&self) -> bool {
        self.has_permission(Permission::Admin, None)
    }

    pub fn check_is_system_administrator(&self) -> Result<&Self> {
        if !self.is_system_administrator() {
            return Err(IssueflowError::Forbidden(
                "system administrator rights required".to_string(),
            ));
        }
        Ok(self)
    }
}
