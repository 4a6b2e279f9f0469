//! Domain logic for the issue workflow
//!
//! Transition functions, the executor that applies them, guards, transition
//! definitions and the workflow state machine tying them together.

mod conditions;
mod defaults;
mod executor;
mod functions;
mod states;
mod transitions;
mod validation;
mod workflow;


pub use conditions::Condition;
pub use defaults::default_workflow;
pub use executor::execute_functions;
pub use functions::{FunctionContext, TransitionFunction};
pub use states::{is_unresolved_status, ISSUE_STATUSES, UNRESOLVED_STATUSES};
pub use transitions::Transition;
pub use validation::validate_issue;
pub use workflow::{Workflow, WorkflowBuilder};
