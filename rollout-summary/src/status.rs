//! Step status derivation
//!
//! Scans a step's (already filtered) events once and assigns one terminal
//! status. Resolution is by fixed priority, independent of timestamp order:
//! a failure marker always wins, even if a completion marker arrived later.
//! This models rollback/retry semantics where a step can be marked complete
//! and subsequently fail a post-check.

use crate::types::{StepStatus, WorkflowEvent};

/// Event type token marking the start of a step
pub const STEP_STARTED: &str = "WorkflowStepStarted";
/// Event type token marking successful completion of a step
pub const STEP_COMPLETED: &str = "WorkflowStepCompleted";
/// Event type token marking failure of a step
pub const STEP_FAILED: &str = "WorkflowStepFailed";

/// Derive the status of a step from its surviving events
///
/// Unrecognized event types are ignored here; they still count toward event
/// totals and still show up in detail mode. An empty event list yields
/// `Unknown`.
pub fn derive_status<'a, I>(events: I) -> StepStatus
where
    I: IntoIterator<Item = &'a WorkflowEvent>,
{
    let mut started = false;
    let mut completed = false;
    let mut failed = false;

    for event in events {
        match event.event_type.as_str() {
            STEP_STARTED => started = true,
            STEP_COMPLETED => completed = true,
            STEP_FAILED => failed = true,
            _ => {}
        }
    }

    if failed {
        StepStatus::Failed
    } else if completed {
        StepStatus::Success
    } else if started {
        StepStatus::InProgress
    } else {
        StepStatus::Unknown
    }
}
