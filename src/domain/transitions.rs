//! Transition definitions
//!
//! A transition is a named edge between two statuses carrying a guard and
//! the functions to apply when it fires. Definitions are immutable once a
//! [`Workflow`](super::Workflow) has been built from them.

use serde::{Deserialize, Serialize};

use crate::auth::UserSession;
use crate::schemas::{Issue, IssueStatus};

use super::conditions::Condition;
use super::functions::TransitionFunction;

/// Definition of a state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    key: String,
    from: IssueStatus,
    to: IssueStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    functions: Vec<TransitionFunction>,
    /// Fired by analysis, never offered to users
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    automatic: bool,
}

impl Transition {
    pub fn new(key: impl Into<String>, from: IssueStatus, to: IssueStatus) -> Self {
        Self {
            key: key.into(),
            from,
            to,
            conditions: Vec::new(),
            functions: Vec::new(),
            automatic: false,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_function(mut self, function: TransitionFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_functions(mut self, functions: Vec<TransitionFunction>) -> Self {
        self.functions = functions;
        self
    }

    /// Mark the transition as automatic
    pub fn automatic(mut self) -> Self {
        self.automatic = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn from(&self) -> IssueStatus {
        self.from
    }

    pub fn to(&self) -> IssueStatus {
        self.to
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn functions(&self) -> &[TransitionFunction] {
        &self.functions
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Whether every condition of the guard holds. An empty guard always holds.
    pub fn supports(&self, issue: &Issue, session: &UserSession) -> bool {
        self.conditions.iter().all(|c| c.matches(issue, session))
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.key, self.from, self.to)
    }
}
