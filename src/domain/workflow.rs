//! Workflow state machine
//!
//! Registry of the transitions leaving each status. Built once, validated at
//! build time, read-only afterwards and safe to share between threads.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use regex::Regex;

use crate::auth::UserSession;
use crate::errors::{IssueflowError, Result};
use crate::schemas::{ChangeContext, FieldDiffs, Issue, IssueChange, IssueStatus};

use super::executor::execute_functions;
use super::states::ISSUE_STATUSES;
use super::transitions::Transition;
use super::validation::validate_issue;

const TRANSITION_KEY_PATTERN: &str = "^[a-z][a-z0-9_-]*$";

/// Immutable mapping from status to outgoing transitions
#[derive(Debug, Clone)]
pub struct Workflow {
    transitions: BTreeMap<IssueStatus, Vec<Transition>>,
}

/// Collects transitions and validates them into a [`Workflow`]
#[derive(Debug, Default)]
pub struct WorkflowBuilder {
    transitions: Vec<Transition>,
}

impl WorkflowBuilder {
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Validate the table and freeze it.
    ///
    /// # Errors
    /// * `WorkflowDefinition` - a key is malformed, or a key is registered
    ///   twice for the same source status
    pub fn build(self) -> Result<Workflow> {
        let key_pattern = Regex::new(TRANSITION_KEY_PATTERN)
            .map_err(|e| IssueflowError::wrap(e, "Invalid transition key pattern"))?;

        let mut seen: HashSet<(IssueStatus, String)> = HashSet::new();
        for transition in &self.transitions {
            if !key_pattern.is_match(transition.key()) {
                return Err(IssueflowError::WorkflowDefinition(format!(
                    "transition key '{}' must match {}",
                    transition.key(),
                    TRANSITION_KEY_PATTERN
                )));
            }
            if !seen.insert((transition.from(), transition.key().to_string())) {
                return Err(IssueflowError::WorkflowDefinition(format!(
                    "transition '{}' is defined twice from status {}",
                    transition.key(),
                    transition.from()
                )));
            }
        }

        let mut transitions: BTreeMap<IssueStatus, Vec<Transition>> = BTreeMap::new();
        for transition in self.transitions {
            transitions.entry(transition.from()).or_default().push(transition);
        }

        tracing::debug!(transitions = seen.len(), "workflow built");
        Ok(Workflow { transitions })
    }
}

impl Workflow {
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::default()
    }

    /// Build a workflow from a flat transition list (e.g. loaded from JSON)
    pub fn from_transitions(transitions: Vec<Transition>) -> Result<Self> {
        Self::builder().transitions(transitions).build()
    }

    /// All transitions leaving `status`, manual and automatic, in definition order
    pub fn outgoing(&self, status: IssueStatus) -> &[Transition] {
        self.transitions
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every transition of the workflow, grouped by source status
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values().flatten()
    }

    /// Look up a transition by source status and key, ignoring guards
    pub fn transition(&self, from: IssueStatus, key: &str) -> Option<&Transition> {
        self.outgoing(from).iter().find(|t| t.key() == key)
    }

    /// Statuses referenced by at least one transition, in lifecycle order
    pub fn statuses(&self) -> Vec<IssueStatus> {
        let referenced: BTreeSet<IssueStatus> = self
            .transitions()
            .flat_map(|t| [t.from(), t.to()])
            .collect();
        ISSUE_STATUSES
            .iter()
            .copied()
            .filter(|s| referenced.contains(s))
            .collect()
    }

    /// True when no manual transition leaves `status`
    pub fn is_terminal(&self, status: IssueStatus) -> bool {
        self.outgoing(status).iter().all(Transition::is_automatic)
    }

    /// Transitions the session may fire on the issue right now.
    ///
    /// Keeps the manual transitions leaving the issue's status whose guard
    /// holds. Recomputed on every call; nothing is cached between calls.
    pub fn available_transitions<'a>(
        &'a self,
        issue: &'a Issue,
        session: &'a UserSession,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.outgoing(issue.status)
            .iter()
            .filter(move |t| is_available(t, issue, session))
    }

    /// Fire the transition `key` on the issue.
    ///
    /// Availability is checked again here, against the current status and
    /// session, before anything is touched. The status moves first, then the
    /// transition's functions run, then the issue invariants are validated.
    ///
    /// On error the issue may be partially mutated and must not be persisted.
    ///
    /// # Errors
    /// * `IllegalTransition` - `key` is not currently available
    /// * `InvalidIssueState` - a function or the resulting state is invalid
    pub fn do_transition(
        &self,
        issue: &mut Issue,
        key: &str,
        change: &ChangeContext,
        session: &UserSession,
    ) -> Result<IssueChange> {
        let Some(transition) = self.find_available(issue, key, session) else {
            tracing::warn!(
                issue = %issue.key,
                transition = key,
                status = %issue.status,
                login = session.login().unwrap_or("<anonymous>"),
                "transition rejected"
            );
            return Err(IssueflowError::IllegalTransition {
                key: key.to_string(),
                status: issue.status,
            });
        };
        fire(transition, issue, change)
    }

    /// Fire the first automatic transition from the issue's status whose
    /// guard holds, if any.
    ///
    /// Guards are evaluated against an anonymous session, so automatic
    /// transitions should only depend on the issue itself.
    pub fn do_automatic_transition(
        &self,
        issue: &mut Issue,
        change: &ChangeContext,
    ) -> Result<Option<IssueChange>> {
        let session = UserSession::anonymous();
        let transition = self
            .outgoing(issue.status)
            .iter()
            .find(|t| t.is_automatic() && t.supports(issue, &session));
        match transition {
            Some(transition) => fire(transition, issue, change).map(Some),
            None => Ok(None),
        }
    }

    fn find_available(&self, issue: &Issue, key: &str, session: &UserSession) -> Option<&Transition> {
        self.outgoing(issue.status)
            .iter()
            .find(|t| t.key() == key && is_available(t, issue, session))
    }
}

fn is_available(transition: &Transition, issue: &Issue, session: &UserSession) -> bool {
    if transition.is_automatic() {
        return false;
    }
    let supported = transition.supports(issue, session);
    if !supported {
        tracing::debug!(
            issue = %issue.key,
            transition = transition.key(),
            "guard does not hold"
        );
    }
    supported
}

fn fire(transition: &Transition, issue: &mut Issue, change: &ChangeContext) -> Result<IssueChange> {
    let from = issue.status;
    let mut diffs = FieldDiffs::new();
    if from != transition.to() {
        diffs.set("status", Some(from.to_string()), Some(transition.to().to_string()));
        issue.status = transition.to();
    }

    diffs.merge(execute_functions(transition.functions(), issue, change)?);
    validate_issue(issue)?;

    tracing::info!(
        issue = %issue.key,
        transition = transition.key(),
        from = %from,
        to = %issue.status,
        "transition applied"
    );

    Ok(IssueChange {
        issue_key: issue.key.clone(),
        transition: transition.key().to_string(),
        login: change.login().map(str::to_string),
        date: change.date(),
        source: change.source(),
        diffs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Permission;
    use crate::domain::{Condition, TransitionFunction};
    use crate::schemas::Resolution;
    use chrono::{TimeZone, Utc};

    fn change() -> ChangeContext {
        ChangeContext::manual("dev", Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
    }

    fn user_guard() -> Condition {
        Condition::HasProjectPermission(Permission::User)
    }

    fn workflow() -> Workflow {
        Workflow::builder()
            .transition(
                Transition::new("confirm", IssueStatus::Open, IssueStatus::Confirmed)
                    .with_condition(user_guard()),
            )
            .transition(
                Transition::new("resolve-fixed", IssueStatus::Confirmed, IssueStatus::Resolved)
                    .with_condition(user_guard())
                    .with_function(TransitionFunction::SetResolution(Some(Resolution::Fixed))),
            )
            .transition(
                Transition::new("close", IssueStatus::Resolved, IssueStatus::Closed)
                    .with_condition(user_guard())
                    .with_function(TransitionFunction::SetCloseDate(true)),
            )
            .transition(
                Transition::new("reopen", IssueStatus::Closed, IssueStatus::Reopened)
                    .with_condition(user_guard())
                    .with_functions(vec![
                        TransitionFunction::SetResolution(None),
                        TransitionFunction::SetCloseDate(false),
                    ]),
            )
            .build()
            .unwrap()
    }

    fn developer() -> UserSession {
        UserSession::logged_in("dev")
            .with_project_permission("proj", Permission::User)
            .with_component("proj:a.rs", "proj")
    }

    fn issue(status: IssueStatus) -> Issue {
        Issue::new("I-1", "proj:a.rs").with_status(status)
    }

    fn keys<'a>(transitions: impl Iterator<Item = &'a Transition>) -> Vec<&'a str> {
        transitions.map(Transition::key).collect()
    }

    #[test]
    fn test_duplicate_key_for_same_status_fails_build() {
        let result = Workflow::builder()
            .transition(Transition::new("reopen", IssueStatus::Closed, IssueStatus::Reopened))
            .transition(Transition::new("reopen", IssueStatus::Closed, IssueStatus::Open))
            .build();
        let err = result.unwrap_err();
        assert_eq!(err.code(), "WORKFLOW_DEFINITION");
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_same_key_from_different_statuses_is_allowed() {
        let workflow = Workflow::builder()
            .transition(Transition::new("reopen", IssueStatus::Closed, IssueStatus::Reopened))
            .transition(Transition::new("reopen", IssueStatus::Resolved, IssueStatus::Reopened))
            .build()
            .unwrap();
        assert!(workflow.transition(IssueStatus::Closed, "reopen").is_some());
        assert!(workflow.transition(IssueStatus::Resolved, "reopen").is_some());
    }

    #[test]
    fn test_malformed_key_fails_build() {
        let err = Workflow::builder()
            .transition(Transition::new("Resolve Fixed", IssueStatus::Open, IssueStatus::Resolved))
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "WORKFLOW_DEFINITION");
    }

    #[test]
    fn test_available_transitions_filter_by_status() {
        let workflow = workflow();
        let session = developer();
        let open = issue(IssueStatus::Open);
        assert_eq!(keys(workflow.available_transitions(&open, &session)), vec!["confirm"]);

        let confirmed = issue(IssueStatus::Confirmed);
        assert_eq!(
            keys(workflow.available_transitions(&confirmed, &session)),
            vec!["resolve-fixed"]
        );
    }

    #[test]
    fn test_available_transitions_filter_by_guard() {
        let workflow = workflow();
        let open = issue(IssueStatus::Open);
        let outsider = UserSession::logged_in("outsider");
        assert_eq!(workflow.available_transitions(&open, &outsider).count(), 0);

        let root = UserSession::logged_in("outsider").with_root();
        assert_eq!(keys(workflow.available_transitions(&open, &root)), vec!["confirm"]);
    }

    #[test]
    fn test_available_transitions_reflect_current_status() {
        let workflow = workflow();
        let session = developer();
        let mut issue = issue(IssueStatus::Open);
        workflow.do_transition(&mut issue, "confirm", &change(), &session).unwrap();
        assert_eq!(
            keys(workflow.available_transitions(&issue, &session)),
            vec!["resolve-fixed"]
        );
    }

    #[test]
    fn test_confirm_changes_only_status() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Open)
            .with_assignee(Some("bob".into()))
            .with_line(Some(12));
        let before = issue.clone();

        let change = workflow
            .do_transition(&mut issue, "confirm", &change(), &developer())
            .unwrap();

        assert_eq!(issue.status, IssueStatus::Confirmed);
        assert_eq!(issue.clone().with_status(IssueStatus::Open), before);
        assert_eq!(change.transition, "confirm");
        assert_eq!(change.login.as_deref(), Some("dev"));
        assert_eq!(change.diffs.len(), 1);
        let status = change.diffs.get("status").unwrap();
        assert_eq!(status.old.as_deref(), Some("OPEN"));
        assert_eq!(status.new.as_deref(), Some("CONFIRMED"));
    }

    #[test]
    fn test_resolve_fixed_sets_resolution() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Confirmed);
        workflow
            .do_transition(&mut issue, "resolve-fixed", &change(), &developer())
            .unwrap();
        assert_eq!(issue.status, IssueStatus::Resolved);
        assert_eq!(issue.resolution, Some(Resolution::Fixed));
    }

    #[test]
    fn test_close_stamps_change_date() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Resolved).with_resolution(Some(Resolution::Fixed));
        workflow.do_transition(&mut issue, "close", &change(), &developer()).unwrap();
        assert_eq!(issue.status, IssueStatus::Closed);
        assert_eq!(issue.close_date, Some(change().date()));
    }

    #[test]
    fn test_reopen_clears_resolution_and_close_date() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Closed)
            .with_resolution(Some(Resolution::Fixed))
            .with_close_date(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        workflow.do_transition(&mut issue, "reopen", &change(), &developer()).unwrap();
        assert_eq!(issue.status, IssueStatus::Reopened);
        assert!(issue.resolution.is_none());
        assert!(issue.close_date.is_none());
    }

    #[test]
    fn test_unauthorized_resolve_is_illegal() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Confirmed);
        let before = issue.clone();
        let err = workflow
            .do_transition(&mut issue, "resolve-fixed", &change(), &UserSession::logged_in("outsider"))
            .unwrap_err();
        assert!(matches!(
            err,
            IssueflowError::IllegalTransition { ref key, status: IssueStatus::Confirmed } if key == "resolve-fixed"
        ));
        assert_eq!(issue, before);
    }

    #[test]
    fn test_known_key_from_other_status_is_illegal() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Open);
        let err = workflow
            .do_transition(&mut issue, "close", &change(), &developer())
            .unwrap_err();
        assert_eq!(err.code(), "ILLEGAL_TRANSITION");
        assert_eq!(issue.status, IssueStatus::Open);
    }

    #[test]
    fn test_unknown_key_is_illegal() {
        let workflow = workflow();
        let mut issue = issue(IssueStatus::Open);
        let err = workflow
            .do_transition(&mut issue, "teleport", &change(), &developer().with_root())
            .unwrap_err();
        assert_eq!(err.code(), "ILLEGAL_TRANSITION");
    }

    #[test]
    fn test_invariant_violation_is_surfaced() {
        let workflow = Workflow::builder()
            .transition(Transition::new("close", IssueStatus::Confirmed, IssueStatus::Closed)
                .with_function(TransitionFunction::SetCloseDate(true)))
            .build()
            .unwrap();
        let mut issue = issue(IssueStatus::Confirmed);
        let err = workflow
            .do_transition(&mut issue, "close", &change(), &developer())
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ISSUE_STATE");
        assert!(err.to_string().contains("resolution"));
    }

    #[test]
    fn test_automatic_transitions_are_not_offered() {
        let workflow = Workflow::builder()
            .transition(
                Transition::new("autoclose", IssueStatus::Open, IssueStatus::Closed)
                    .with_condition(Condition::IsBeingClosed)
                    .with_functions(vec![
                        TransitionFunction::SetResolution(Some(Resolution::Removed)),
                        TransitionFunction::SetCloseDate(true),
                    ])
                    .automatic(),
            )
            .build()
            .unwrap();
        let mut issue = issue(IssueStatus::Open).with_being_closed(true);
        let root = UserSession::logged_in("admin").with_root();

        assert_eq!(workflow.available_transitions(&issue, &root).count(), 0);
        let err = workflow
            .do_transition(&mut issue, "autoclose", &change(), &root)
            .unwrap_err();
        assert_eq!(err.code(), "ILLEGAL_TRANSITION");

        let scan = ChangeContext::scan(change().date());
        let fired = workflow.do_automatic_transition(&mut issue, &scan).unwrap().unwrap();
        assert_eq!(fired.transition, "autoclose");
        assert!(fired.login.is_none());
        assert_eq!(issue.status, IssueStatus::Closed);
        assert_eq!(issue.resolution, Some(Resolution::Removed));
    }

    #[test]
    fn test_automatic_transition_none_when_guard_fails() {
        let workflow = Workflow::builder()
            .transition(
                Transition::new("autoclose", IssueStatus::Open, IssueStatus::Closed)
                    .with_condition(Condition::IsBeingClosed)
                    .automatic(),
            )
            .build()
            .unwrap();
        let mut issue = issue(IssueStatus::Open);
        let result = workflow
            .do_automatic_transition(&mut issue, &ChangeContext::scan(Utc::now()))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(issue.status, IssueStatus::Open);
    }

    #[test]
    fn test_terminality_comes_from_transitions() {
        let workflow = workflow();
        assert!(!workflow.is_terminal(IssueStatus::Closed));
        // REOPENED has no outgoing transitions in this table
        assert!(workflow.is_terminal(IssueStatus::Reopened));
        assert_eq!(workflow.statuses(), ISSUE_STATUSES.to_vec());
    }

    #[test]
    fn test_workflow_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Workflow>();
    }
}
