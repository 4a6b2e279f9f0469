//! The built-in issue workflow

use crate::auth::Permission;
use crate::errors::Result;
use crate::schemas::{IssueStatus, Resolution};

use super::conditions::Condition;
use super::functions::TransitionFunction;
use super::states::UNRESOLVED_STATUSES;
use super::transitions::Transition;
use super::workflow::Workflow;

/// Build the default workflow.
///
/// Manual transitions are guarded by project permissions: `user` for the
/// day-to-day moves, `issueadmin` for resolutions that hide a problem and
/// for reopening closed issues. Issues flagged by analysis as gone are
/// closed automatically as REMOVED.
pub fn default_workflow() -> Result<Workflow> {
    use IssueStatus::*;

    let user = || Condition::HasProjectPermission(Permission::User);
    let issue_admin = || Condition::HasProjectPermission(Permission::IssueAdmin);

    let mut builder = Workflow::builder()
        .transition(Transition::new("confirm", Open, Confirmed).with_condition(user()))
        .transition(Transition::new("confirm", Reopened, Confirmed).with_condition(user()))
        .transition(Transition::new("unconfirm", Confirmed, Reopened).with_condition(user()))
        .transition(
            Transition::new("reopen", Resolved, Reopened)
                .with_condition(user())
                .with_function(TransitionFunction::SetResolution(None)),
        )
        .transition(
            Transition::new("close", Resolved, Closed)
                .with_condition(user())
                .with_function(TransitionFunction::SetCloseDate(true)),
        )
        .transition(
            Transition::new("reopen", Closed, Reopened)
                .with_condition(issue_admin())
                .with_functions(vec![
                    TransitionFunction::SetResolution(None),
                    TransitionFunction::SetCloseDate(false),
                ]),
        );

    for &from in UNRESOLVED_STATUSES {
        builder = builder
            .transition(
                Transition::new("resolve-fixed", from, Resolved)
                    .with_condition(user())
                    .with_function(TransitionFunction::SetResolution(Some(Resolution::Fixed))),
            )
            .transition(
                Transition::new("falsepositive", from, Resolved)
                    .with_condition(issue_admin())
                    .with_functions(vec![
                        TransitionFunction::SetResolution(Some(Resolution::FalsePositive)),
                        TransitionFunction::SetAssignee(None),
                    ]),
            )
            .transition(
                Transition::new("wontfix", from, Resolved)
                    .with_condition(issue_admin())
                    .with_functions(vec![
                        TransitionFunction::SetResolution(Some(Resolution::WontFix)),
                        TransitionFunction::SetAssignee(None),
                    ]),
            );
    }

    for &from in UNRESOLVED_STATUSES.iter().chain(&[Resolved]) {
        builder = builder.transition(
            Transition::new("automaticclose", from, Closed)
                .with_condition(Condition::IsBeingClosed)
                .with_functions(vec![
                    TransitionFunction::SetResolution(Some(Resolution::Removed)),
                    TransitionFunction::SetCloseDate(true),
                    TransitionFunction::SetLine(None),
                ])
                .automatic(),
        );
    }

    builder.build()
}
