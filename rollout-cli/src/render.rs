//! Summary rendering
//!
//! Turns an `ExecutionSummary` into operator-facing output: a plain-text
//! table for terminals or a pretty-printed JSON document for piping into
//! other tools.

use anyhow::Result;
use clap::ValueEnum;
use rollout_summary::{DedupedEvent, ExecutionSummary};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for the rendered summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render a summary in the requested format
pub fn render(summary: &ExecutionSummary, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(summary, out),
        OutputFormat::Json => render_json(summary, out),
    }
}

fn render_json(summary: &ExecutionSummary, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}

fn render_table(summary: &ExecutionSummary, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Workflow:    {}", summary.workflow_id)?;
    writeln!(out, "Environment: {}", summary.environment_id)?;
    writeln!(out, "Service:     {}", summary.service_id)?;

    if summary.resources.is_empty() {
        writeln!(out, "\nNo resources matched.")?;
    }

    for resource in &summary.resources {
        writeln!(out)?;
        writeln!(
            out,
            "── {} ({}, key {})",
            resource.resource_name, resource.resource_id, resource.resource_key
        )?;

        let name_width = resource
            .steps
            .iter()
            .map(|s| s.step_name.len())
            .max()
            .unwrap_or(0)
            .max("STEP".len());

        writeln!(
            out,
            "  {:<name_width$}  {:<11}  {:<25}  {:<25}  {:>6}",
            "STEP", "STATUS", "START", "END", "EVENTS"
        )?;
        for step in &resource.steps {
            writeln!(
                out,
                "  {:<name_width$}  {:<11}  {:<25}  {:<25}  {:>6}",
                step.step_name,
                step.status.to_string(),
                step.start_time,
                step.end_time,
                step.event_count
            )?;
            if let Some(detail) = &step.detail {
                for event in detail {
                    writeln!(out, "      {}", format_detail_line(event))?;
                }
            }
        }
    }

    if let Some(stats) = &summary.stats {
        writeln!(out)?;
        writeln!(
            out,
            "Matched {}/{} resources, {}/{} steps, {}/{} events",
            stats.filtered_resources,
            stats.total_resources,
            stats.filtered_steps,
            stats.total_steps,
            stats.filtered_events,
            stats.total_events
        )?;
    }

    Ok(())
}

/// One indented line per deduplicated event; repeated contents carry an
/// occurrence annotation with their first/last arrival times
fn format_detail_line(event: &DedupedEvent) -> String {
    match event.occurrences {
        Some(n) => format!(
            "{}  {}  {}  (x{}, {} .. {})",
            event.event_time,
            event.event_type,
            event.message,
            n,
            event.first_seen.as_deref().unwrap_or("?"),
            event.last_seen.as_deref().unwrap_or("?"),
        ),
        None => format!("{}  {}  {}", event.event_time, event.event_type, event.message),
    }
}
