//! Summary builder
//!
//! Orchestrates the filter predicates, status deriver, and deduplicator
//! across the resource/step tree and assembles the output summary together
//! with before/after filtering counters.
//!
//! The builder itself never errors: filter arguments were validated when the
//! options were built, and an input with no resources simply yields an empty
//! summary.

use crate::dedup::deduplicate;
use crate::filters;
use crate::options::SummaryOptions;
use crate::status::derive_status;
use crate::types::{
    ExecutionSummary, ResourceSummary, StepSummary, SummaryStats, WorkflowEvent,
    WorkflowExecution,
};

/// Build a filtered, deduplicated, status-annotated summary of a workflow
/// execution
///
/// Entities that fail a filter are excluded from the output but still count
/// toward the `total_*` stats; `filtered_*` counts only what is retained.
/// The stats block is attached only when at least one filter/detail option
/// was supplied.
pub fn summarize(execution: &WorkflowExecution, options: &SummaryOptions) -> ExecutionSummary {
    log::debug!(
        "Summarizing workflow {} ({} resources)",
        execution.workflow_id,
        execution.resources.len()
    );

    let mut stats = SummaryStats::default();
    let mut resources = Vec::new();

    for resource in &execution.resources {
        stats.total_resources += 1;
        let resource_matches =
            filters::matches_resource(resource, &options.resource_id, &options.resource_key);
        if !resource_matches {
            log::trace!("Resource {} excluded by id/key filter", resource.resource_id);
        }

        let mut steps = Vec::new();
        for step in &resource.steps {
            // Original totals accumulate even under an excluded resource
            stats.total_steps += 1;
            stats.total_events += step.events.len();

            if !resource_matches {
                continue;
            }
            if !filters::matches_step_name(&step.step_name, &options.step_names) {
                continue;
            }

            let surviving: Vec<&WorkflowEvent> = step
                .events
                .iter()
                .filter(|event| {
                    filters::matches_time_window(
                        event,
                        options.since.as_ref(),
                        options.until.as_ref(),
                    )
                })
                .collect();

            // A step with no surviving events does not appear as an empty step
            if surviving.is_empty() {
                continue;
            }

            stats.filtered_steps += 1;
            stats.filtered_events += surviving.len();

            let detail = options
                .detail
                .then(|| deduplicate(surviving.iter().copied(), options.max_events));

            steps.push(StepSummary {
                step_name: step.step_name.clone(),
                status: derive_status(surviving.iter().copied()),
                start_time: surviving[0].event_time.clone(),
                end_time: surviving[surviving.len() - 1].event_time.clone(),
                event_count: surviving.len(),
                detail,
            });
        }

        // A resource with no surviving steps is omitted entirely
        if steps.is_empty() {
            continue;
        }

        stats.filtered_resources += 1;
        resources.push(ResourceSummary {
            resource_id: resource.resource_id.clone(),
            resource_key: resource.resource_key.clone(),
            resource_name: resource.resource_name.clone(),
            steps,
        });
    }

    log::debug!(
        "Summary retained {}/{} resources, {}/{} steps, {}/{} events",
        stats.filtered_resources,
        stats.total_resources,
        stats.filtered_steps,
        stats.total_steps,
        stats.filtered_events,
        stats.total_events
    );

    ExecutionSummary {
        workflow_id: execution.workflow_id.clone(),
        environment_id: execution.environment_id.clone(),
        service_id: execution.service_id.clone(),
        resources,
        stats: if options.has_filters() { Some(stats) } else { None },
    }
}
