//! Generic plumbing shared by every controller.
//!
//! # Main Components
//!
//! - [`ActionSlot`] - Single-flight lifecycle wrapper for user-triggered async work
//! - [`ActionState`] - `Idle`, `Running`, `Succeeded`, `Failed`
//! - [`RunOutcome`] - What a single trigger resulted in
//! - [`ActionError`] - The recorded, contained failure of a run
//! - [`SubmitOutcome`] - The controller-level view of a trigger, including local validation
//!
//! Controllers own one slot per action and never touch the state channel directly.

pub mod action;
pub mod submit;

pub use action::*;
pub use submit::*;
