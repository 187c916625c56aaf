//! Repair-request workflow
//!
//! The status state machine at the heart of the service. The engine is
//! stateless between calls: it reads the current record, validates the
//! requested change against the legal-transition table, writes the new
//! status plus required payload fields in a single guarded update, and
//! queues the resulting notifications fire-and-forget.

pub mod assignment;
pub mod completion;
pub mod engine;
pub mod error;
pub mod money;
pub mod transition;

#[cfg(test)]
mod tests;

pub use completion::{CompletionInput, PaymentInput};
pub use engine::{TransitionInput, WorkflowEngine};
pub use error::{WorkflowError, WorkflowResult};
pub use transition::{find_rule, transitions_from, Requirement, TransitionRule, TRANSITIONS};
