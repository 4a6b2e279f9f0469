//! Transition functions
//!
//! The side effects a transition may apply to an issue. The set is closed:
//! every function touches exactly one field category and is idempotent.

use serde::{Deserialize, Serialize};

use crate::errors::{IssueflowError, Result};
use crate::schemas::{ChangeContext, FieldDiffs, Issue, Resolution};

/// One atomic side effect applied when a transition fires.
///
/// `None` values are instructions to clear the field, not "leave as is".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TransitionFunction {
    /// Assign to a login, or unassign
    SetAssignee(Option<String>),
    /// Set or clear the resolution
    SetResolution(Option<Resolution>),
    /// `true` stamps the change date as close date, `false` clears it
    SetCloseDate(bool),
    /// Set or clear the line reference
    SetLine(Option<u32>),
}

impl TransitionFunction {
    /// Apply this function through the shared context
    pub fn apply(&self, ctx: &mut FunctionContext<'_>) -> Result<()> {
        match self {
            TransitionFunction::SetAssignee(login) => {
                ctx.set_assignee(login.as_deref())?;
            }
            TransitionFunction::SetResolution(resolution) => {
                ctx.set_resolution(*resolution);
            }
            TransitionFunction::SetCloseDate(close) => {
                ctx.set_close_date(*close);
            }
            TransitionFunction::SetLine(line) => {
                ctx.set_line(*line)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for TransitionFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionFunction::SetAssignee(Some(login)) => write!(f, "set_assignee({})", login),
            TransitionFunction::SetAssignee(None) => write!(f, "set_assignee(null)"),
            TransitionFunction::SetResolution(Some(r)) => write!(f, "set_resolution({})", r),
            TransitionFunction::SetResolution(None) => write!(f, "set_resolution(null)"),
            TransitionFunction::SetCloseDate(close) => write!(f, "set_close_date({})", close),
            TransitionFunction::SetLine(Some(line)) => write!(f, "set_line({})", line),
            TransitionFunction::SetLine(None) => write!(f, "set_line(null)"),
        }
    }
}

/// Mutable state shared by every function of one execution.
///
/// Later functions observe the effects of earlier ones. Each setter records a
/// field diff only when the value actually changes.
pub struct FunctionContext<'a> {
    issue: &'a mut Issue,
    change: &'a ChangeContext,
    diffs: FieldDiffs,
}

impl<'a> FunctionContext<'a> {
    pub(crate) fn new(issue: &'a mut Issue, change: &'a ChangeContext) -> Self {
        FunctionContext {
            issue,
            change,
            diffs: FieldDiffs::new(),
        }
    }

    pub fn issue(&self) -> &Issue {
        self.issue
    }

    pub fn change(&self) -> &ChangeContext {
        self.change
    }

    pub fn set_assignee(&mut self, login: Option<&str>) -> Result<&mut Self> {
        if login.is_some_and(|l| l.trim().is_empty()) {
            return Err(IssueflowError::InvalidIssueState(format!(
                "issue {}: assignee login must not be blank",
                self.issue.key
            )));
        }
        if self.issue.assignee.as_deref() != login {
            let old = self.issue.assignee.take();
            self.issue.assignee = login.map(str::to_string);
            self.diffs.set("assignee", old, self.issue.assignee.clone());
        }
        Ok(self)
    }

    pub fn set_resolution(&mut self, resolution: Option<Resolution>) -> &mut Self {
        if self.issue.resolution != resolution {
            let old = self.issue.resolution.map(|r| r.to_string());
            self.issue.resolution = resolution;
            self.diffs.set("resolution", old, resolution.map(|r| r.to_string()));
        }
        self
    }

    pub fn set_close_date(&mut self, close: bool) -> &mut Self {
        let date = close.then(|| self.change.date());
        if self.issue.close_date != date {
            let old = self.issue.close_date.map(|d| d.to_rfc3339());
            self.issue.close_date = date;
            self.diffs.set("close_date", old, date.map(|d| d.to_rfc3339()));
        }
        self
    }

    pub fn set_line(&mut self, line: Option<u32>) -> Result<&mut Self> {
        if line == Some(0) {
            return Err(IssueflowError::InvalidIssueState(format!(
                "issue {}: lines are 1-based",
                self.issue.key
            )));
        }
        if self.issue.line != line {
            let old = self.issue.line.map(|l| l.to_string());
            self.issue.line = line;
            self.diffs.set("line", old, line.map(|l| l.to_string()));
        }
        Ok(self)
    }

    pub(crate) fn into_diffs(self) -> FieldDiffs {
        self.diffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn change() -> ChangeContext {
        ChangeContext::manual("alice", Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
    }

    fn apply_once(function: &TransitionFunction, issue: &mut Issue) -> Result<FieldDiffs> {
        let change = change();
        let mut ctx = FunctionContext::new(issue, &change);
        function.apply(&mut ctx)?;
        Ok(ctx.into_diffs())
    }

    #[test]
    fn test_set_assignee() {
        let mut issue = Issue::new("I-1", "proj");
        let diffs = apply_once(&TransitionFunction::SetAssignee(Some("bob".into())), &mut issue).unwrap();
        assert_eq!(issue.assignee.as_deref(), Some("bob"));
        let diff = diffs.get("assignee").unwrap();
        assert_eq!(diff.old, None);
        assert_eq!(diff.new.as_deref(), Some("bob"));
    }

    #[test]
    fn test_set_assignee_none_clears() {
        let mut issue = Issue::new("I-1", "proj").with_assignee(Some("bob".into()));
        apply_once(&TransitionFunction::SetAssignee(None), &mut issue).unwrap();
        assert!(issue.assignee.is_none());
    }

    #[test]
    fn test_set_assignee_rejects_blank_login() {
        let mut issue = Issue::new("I-1", "proj");
        let err = apply_once(&TransitionFunction::SetAssignee(Some("  ".into())), &mut issue).unwrap_err();
        assert_eq!(err.code(), "INVALID_ISSUE_STATE");
        assert!(issue.assignee.is_none());
    }

    #[test]
    fn test_set_resolution_twice_records_nothing_second_time() {
        let mut issue = Issue::new("I-1", "proj");
        let function = TransitionFunction::SetResolution(Some(Resolution::Fixed));

        let first = apply_once(&function, &mut issue).unwrap();
        assert_eq!(first.len(), 1);
        let second = apply_once(&function, &mut issue).unwrap();
        assert!(second.is_empty());
        assert_eq!(issue.resolution, Some(Resolution::Fixed));
    }

    #[test]
    fn test_set_resolution_none_clears() {
        let mut issue = Issue::new("I-1", "proj").with_resolution(Some(Resolution::WontFix));
        let diffs = apply_once(&TransitionFunction::SetResolution(None), &mut issue).unwrap();
        assert!(issue.resolution.is_none());
        assert_eq!(diffs.get("resolution").unwrap().old.as_deref(), Some("WONTFIX"));
    }

    #[test]
    fn test_set_close_date_uses_change_date() {
        let mut issue = Issue::new("I-1", "proj");
        apply_once(&TransitionFunction::SetCloseDate(true), &mut issue).unwrap();
        assert_eq!(issue.close_date, Some(change().date()));

        apply_once(&TransitionFunction::SetCloseDate(false), &mut issue).unwrap();
        assert!(issue.close_date.is_none());
    }

    #[test]
    fn test_set_line() {
        let mut issue = Issue::new("I-1", "proj").with_line(Some(3));
        apply_once(&TransitionFunction::SetLine(Some(42)), &mut issue).unwrap();
        assert_eq!(issue.line, Some(42));
        apply_once(&TransitionFunction::SetLine(None), &mut issue).unwrap();
        assert!(issue.line.is_none());
    }

    #[test]
    fn test_set_line_rejects_zero() {
        let mut issue = Issue::new("I-1", "proj").with_line(Some(3));
        let err = apply_once(&TransitionFunction::SetLine(Some(0)), &mut issue).unwrap_err();
        assert_eq!(err.code(), "INVALID_ISSUE_STATE");
        assert_eq!(issue.line, Some(3));
    }

    #[test]
    fn test_function_serialization() {
        let json = serde_json::to_string(&TransitionFunction::SetResolution(Some(Resolution::Fixed))).unwrap();
        assert_eq!(json, r#"{"type":"set_resolution","value":"FIXED"}"#);

        let parsed: TransitionFunction =
            serde_json::from_str(r#"{"type":"set_close_date","value":true}"#).unwrap();
        assert_eq!(parsed, TransitionFunction::SetCloseDate(true));

        let parsed: TransitionFunction =
            serde_json::from_str(r#"{"type":"set_assignee","value":null}"#).unwrap();
        assert_eq!(parsed, TransitionFunction::SetAssignee(None));
    }

    #[test]
    fn test_function_display() {
        assert_eq!(TransitionFunction::SetResolution(None).to_string(), "set_resolution(null)");
        assert_eq!(TransitionFunction::SetCloseDate(true).to_string(), "set_close_date(true)");
        assert_eq!(TransitionFunction::SetLine(Some(7)).to_string(), "set_line(7)");
    }
}
