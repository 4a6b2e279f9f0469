//! Change records - who changed an issue, when, and what moved

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a change originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    /// A user acting through the UI or web API
    #[default]
    Manual,
    /// An automated analysis run
    Scan,
}

/// Immutable record of who performed a change and when.
///
/// One context is created per transition invocation and is never reused
/// across issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeContext {
    login: Option<String>,
    date: DateTime<Utc>,
    source: ChangeSource,
}

impl ChangeContext {
    /// A change made by a user
    pub fn manual(login: impl Into<String>, date: DateTime<Utc>) -> Self {
        ChangeContext {
            login: Some(login.into()),
            date,
            source: ChangeSource::Manual,
        }
    }

    /// A change made by analysis, with no acting user
    pub fn scan(date: DateTime<Utc>) -> Self {
        ChangeContext {
            login: None,
            date,
            source: ChangeSource::Scan,
        }
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn source(&self) -> ChangeSource {
        self.source
    }
}

/// Old and new value of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    #[serde(default)]
    pub old: Option<String>,
    #[serde(default)]
    pub new: Option<String>,
}

/// Field-level changes accumulated while a transition runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDiffs {
    diffs: BTreeMap<String, FieldDiff>,
}

impl FieldDiffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change of `field`.
    ///
    /// When the field was already changed earlier in the same run, the first
    /// old value is kept and only the new value moves. A field that ends up
    /// back at its first old value carries no diff.
    pub fn set(&mut self, field: &str, old: Option<String>, new: Option<String>) {
        let reverted = match self.diffs.get_mut(field) {
            Some(diff) => {
                diff.new = new;
                diff.old == diff.new
            }
            None => {
                let unchanged = old == new;
                if !unchanged {
                    self.diffs.insert(field.to_string(), FieldDiff { old, new });
                }
                unchanged
            }
        };
        if reverted {
            self.diffs.remove(field);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldDiff> {
        self.diffs.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    /// Fold another set of diffs into this one, in order
    pub fn merge(&mut self, other: FieldDiffs) {
        for (field, diff) in other.diffs {
            self.set(&field, diff.old, diff.new);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDiff)> {
        self.diffs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The outcome of a transition, handed to persistence and notification layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueChange {
    /// Key of the changed issue
    pub issue_key: String,

    /// Key of the transition that fired
    pub transition: String,

    /// Acting user, absent for automated changes
    #[serde(default)]
    pub login: Option<String>,

    /// When the change happened
    pub date: DateTime<Utc>,

    /// Where the change originated
    pub source: ChangeSource,

    /// Field-level changes
    pub diffs: FieldDiffs,
}
