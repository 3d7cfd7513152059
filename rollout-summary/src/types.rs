//! Core types for the workflow summary library
//!
//! This module defines the raw workflow execution tree as delivered by the
//! orchestration service, and the derived summary tree the engine produces.
//! The raw entities are read-only inputs; the summary tree is built once per
//! invocation and handed to the caller for rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for summary operations
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors raised while preparing a summary invocation
///
/// The summarizer itself never fails during traversal; everything that can
/// go wrong is caught up front while parsing filter arguments.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Invalid '{field}' filter \"{value}\": not an RFC3339 timestamp ({source})")]
    TimeFilterParse {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A single timestamped diagnostic record emitted during a workflow step
///
/// Timestamps stay strings: the source system emits RFC3339, but individual
/// events with malformed timestamps must still be carried through to the
/// operator (see the time-window filter), so parsing is deferred and lossy
/// conversion is never forced on the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    /// Event timestamp as an RFC3339 string
    pub event_time: String,
    /// Open event type token (e.g., "WorkflowStepStarted")
    pub event_type: String,
    /// Human-readable diagnostic message
    pub message: String,
}

impl WorkflowEvent {
    /// Convenience constructor, mostly for tests and fixtures
    pub fn new(
        event_time: impl Into<String>,
        event_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event_time: event_time.into(),
            event_type: event_type.into(),
            message: message.into(),
        }
    }
}

/// A named phase of a resource's execution (e.g., Bootstrap, Deployment)
///
/// Events keep the arrival order from the source system; they are not
/// guaranteed to be time-sorted and the engine never re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub step_name: String,
    #[serde(default)]
    pub events: Vec<WorkflowEvent>,
}

/// Per-resource slice of a workflow execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceExecution {
    pub resource_id: String,
    pub resource_key: String,
    pub resource_name: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

/// Root of the raw event tree returned by the orchestration service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub environment_id: String,
    pub service_id: String,
    #[serde(default)]
    pub resources: Vec<ResourceExecution>,
}

/// Terminal status assigned to a step by scanning its events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    /// No recognized lifecycle marker seen (or no events at all)
    Unknown,
    /// A start marker was seen but neither completion nor failure
    InProgress,
    /// A completion marker was seen and no failure marker
    Success,
    /// A failure marker was seen; always wins regardless of order
    Failed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Unknown => write!(f, "unknown"),
            StepStatus::InProgress => write!(f, "in-progress"),
            StepStatus::Success => write!(f, "success"),
            StepStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One collapsed event record produced by deduplication
///
/// Singleton rule: when the content occurred exactly once, the record is
/// reported bare and `occurrences`/`first_seen`/`last_seen` are all `None`
/// (and omitted from serialized output). When it occurred more than once,
/// all three are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupedEvent {
    /// Timestamp of the first occurrence of this content
    pub event_time: String,
    pub event_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// Summary of one step after filtering, status derivation, and (optionally)
/// deduplication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub step_name: String,
    pub status: StepStatus,
    /// Timestamp of the first surviving event, in original relative order
    pub start_time: String,
    /// Timestamp of the last surviving event, in original relative order
    pub end_time: String,
    /// Number of events that survived filtering (before deduplication)
    pub event_count: usize,
    /// Deduplicated events, present only in detail mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<DedupedEvent>>,
}

/// Summary of one resource; resources with zero surviving steps are omitted
/// from the output entirely rather than appearing empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub resource_id: String,
    pub resource_key: String,
    pub resource_name: String,
    pub steps: Vec<StepSummary>,
}

/// Before/after filtering counters
///
/// `total_*` count every entity in the input, `filtered_*` only the
/// entities retained in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_resources: usize,
    pub filtered_resources: usize,
    pub total_steps: usize,
    pub filtered_steps: usize,
    pub total_events: usize,
    pub filtered_events: usize,
}

/// Root of the derived summary tree - the engine's only output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    pub workflow_id: String,
    pub environment_id: String,
    pub service_id: String,
    pub resources: Vec<ResourceSummary>,
    /// Populated only when at least one filter/detail option was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SummaryStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_display() {
        assert_eq!(format!("{}", StepStatus::Unknown), "unknown");
        assert_eq!(format!("{}", StepStatus::InProgress), "in-progress");
        assert_eq!(format!("{}", StepStatus::Success), "success");
        assert_eq!(format!("{}", StepStatus::Failed), "failed");
    }

    #[test]
    fn test_singleton_event_serialization_omits_occurrence_fields() {
        let event = DedupedEvent {
            event_time: "2024-05-01T10:00:00Z".to_string(),
            event_type: "Debug".to_string(),
            message: "probe ok".to_string(),
            occurrences: None,
            first_seen: None,
            last_seen: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("occurrences"));
        assert!(!obj.contains_key("firstSeen"));
        assert!(!obj.contains_key("lastSeen"));
        assert_eq!(obj["eventTime"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_repeated_event_serialization_keeps_occurrence_fields() {
        let event = DedupedEvent {
            event_time: "2024-05-01T10:00:00Z".to_string(),
            event_type: "Debug".to_string(),
            message: "retrying".to_string(),
            occurrences: Some(4),
            first_seen: Some("2024-05-01T10:00:00Z".to_string()),
            last_seen: Some("2024-05-01T10:00:12Z".to_string()),
        };

        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["occurrences"], 4);
        assert_eq!(obj["firstSeen"], "2024-05-01T10:00:00Z");
        assert_eq!(obj["lastSeen"], "2024-05-01T10:00:12Z");
    }

    #[test]
    fn test_execution_deserializes_from_camel_case() {
        let json = r#"{
            "workflowId": "wf-1",
            "environmentId": "env-1",
            "serviceId": "svc-1",
            "resources": [{
                "resourceId": "res-1",
                "resourceKey": "web",
                "resourceName": "web-server",
                "steps": [{
                    "stepName": "Bootstrap",
                    "events": [{
                        "eventTime": "2024-05-01T10:00:00Z",
                        "eventType": "WorkflowStepStarted",
                        "message": "started"
                    }]
                }]
            }]
        }"#;

        let execution: WorkflowExecution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.workflow_id, "wf-1");
        assert_eq!(execution.resources.len(), 1);
        assert_eq!(execution.resources[0].steps[0].step_name, "Bootstrap");
        assert_eq!(
            execution.resources[0].steps[0].events[0].event_type,
            "WorkflowStepStarted"
        );
    }

    #[test]
    fn test_summary_without_stats_omits_stats_block() {
        let summary = ExecutionSummary {
            workflow_id: "wf-1".to_string(),
            environment_id: "env-1".to_string(),
            service_id: "svc-1".to_string(),
            resources: vec![],
            stats: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert!(!json.as_object().unwrap().contains_key("stats"));
    }
}
