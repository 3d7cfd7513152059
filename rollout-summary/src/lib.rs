//! Workflow Execution Summary Library
//!
//! A stateless, reusable library that turns the raw per-resource event tree
//! of a deployment workflow into a compact, filtered, deduplicated,
//! status-annotated summary for an operator debugging a rollout.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on summarization:
//! - Filters resources, steps, and events by identity and time window
//! - Derives one terminal status per step from its lifecycle markers
//! - Collapses repeated diagnostic events into bounded, occurrence-annotated
//!   records
//! - Tracks before/after filtering statistics
//!
//! The library does NOT:
//! - Fetch the event tree from the orchestration service
//! - Render summaries as tables or JSON documents
//! - Parse command-line flags
//!
//! All of that lives in the application layer (rollout-cli). The engine is
//! purely synchronous and pure-functional over its input snapshot: no I/O,
//! no shared state, cost linear in the total event count.
//!
//! # Example Usage
//!
//! ```
//! use rollout_summary::{summarize, SummaryOptions, WorkflowExecution};
//!
//! let execution = WorkflowExecution {
//!     workflow_id: "wf-1".to_string(),
//!     environment_id: "env-1".to_string(),
//!     service_id: "svc-1".to_string(),
//!     resources: vec![],
//! };
//!
//! let options = SummaryOptions::new()
//!     .with_step_names(vec!["Deployment".to_string()])
//!     .with_detail(true)
//!     .with_time_window(Some("2024-05-01T00:00:00Z"), None)
//!     .unwrap();
//!
//! let summary = summarize(&execution, &options);
//! assert!(summary.resources.is_empty());
//! ```

// Public modules
pub mod dedup;
pub mod filters;
pub mod options;
pub mod status;
pub mod summarize;
pub mod types;

// Re-export main types for convenience
pub use dedup::deduplicate;
pub use options::{SummaryOptions, DEFAULT_MAX_EVENTS};
pub use status::{derive_status, STEP_COMPLETED, STEP_FAILED, STEP_STARTED};
pub use summarize::summarize;
pub use types::{
    DedupedEvent, ExecutionSummary, ResourceExecution, ResourceSummary, Result, StepStatus,
    StepSummary, SummaryError, SummaryStats, WorkflowEvent, WorkflowExecution, WorkflowStep,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: default options apply no filters
        let options = SummaryOptions::new();
        assert!(!options.has_filters());
    }
}
