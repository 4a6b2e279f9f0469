//! Function executor
//!
//! Runs a transition's function list against one issue.

use crate::errors::Result;
use crate::schemas::{ChangeContext, FieldDiffs, Issue};

use super::functions::{FunctionContext, TransitionFunction};

/// Apply `functions` to `issue` in list order.
///
/// An empty list is a no-op and builds no context. Otherwise a single
/// [`FunctionContext`] is threaded through every function, so later functions
/// see earlier effects.
///
/// Execution stops at the first error. Functions already applied are not
/// rolled back: the caller must discard the issue instead of persisting it.
///
/// # Returns
/// The field diffs recorded along the way
pub fn execute_functions(
    functions: &[TransitionFunction],
    issue: &mut Issue,
    change: &ChangeContext,
) -> Result<FieldDiffs> {
    if functions.is_empty() {
        return Ok(FieldDiffs::new());
    }

    let mut ctx = FunctionContext::new(issue, change);
    for function in functions {
        function.apply(&mut ctx)?;
    }
    Ok(ctx.into_diffs())
}
