//! The result of a form submission or button click, as reported to the caller.

use super::{ActionError, RunOutcome};
use crate::validation::ValidationError;

/// What a controller did with one user trigger.
///
/// None of these are errors from the caller's point of view: the UI keeps
/// running whatever comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked locally; the slot never entered `Running`.
    Invalid(ValidationError),
    /// Dropped because the same action was already running.
    Busy,
    Completed,
    /// The external operation failed and the failure was contained.
    Failed(ActionError),
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}

impl From<RunOutcome<()>> for SubmitOutcome {
    fn from(outcome: RunOutcome<()>) -> Self {
        match outcome {
            RunOutcome::Rejected => SubmitOutcome::Busy,
            RunOutcome::Succeeded(()) => SubmitOutcome::Completed,
            RunOutcome::Failed(e) => SubmitOutcome::Failed(e),
        }
    }
}
