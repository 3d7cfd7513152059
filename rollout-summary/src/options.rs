//! Summary options
//!
//! This module defines the filter parameters accepted by the summarizer.
//! Time-window arguments are parsed once, up front, and a malformed value is
//! a hard error - unlike malformed per-event timestamps inside the snapshot,
//! which the filters deliberately let through (see the `filters` module).

use crate::types::{Result, SummaryError};
use chrono::{DateTime, FixedOffset};

/// Default cap on distinct event contents retained per event type in
/// detail mode
pub const DEFAULT_MAX_EVENTS: i64 = 3;

/// Filter and output options for one summary invocation
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Exact resource id to match; empty = all resources
    pub resource_id: String,
    /// Exact resource key to match; empty = all resources
    pub resource_key: String,
    /// Step names to keep (case-insensitive exact match); empty = all steps
    pub step_names: Vec<String>,
    /// Attach deduplicated event lists to each step
    pub detail: bool,
    /// Cap on distinct contents per event type in detail mode; <= 0 = unlimited
    pub max_events: i64,
    /// Inclusive lower bound on event time
    pub since: Option<DateTime<FixedOffset>>,
    /// Exclusive upper bound on event time
    pub until: Option<DateTime<FixedOffset>>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            resource_id: String::new(),
            resource_key: String::new(),
            step_names: Vec::new(),
            detail: false,
            max_events: DEFAULT_MAX_EVENTS,
            since: None,
            until: None,
        }
    }
}

impl SummaryOptions {
    /// Create options with default settings (no filters, no detail)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: filter to a single resource id
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = resource_id.into();
        self
    }

    /// Builder method: filter to a single resource key
    pub fn with_resource_key(mut self, resource_key: impl Into<String>) -> Self {
        self.resource_key = resource_key.into();
        self
    }

    /// Builder method: restrict output to the given step names
    pub fn with_step_names(mut self, step_names: Vec<String>) -> Self {
        self.step_names = step_names;
        self
    }

    /// Builder method: enable or disable detail mode
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Builder method: set the per-type distinct content cap
    pub fn with_max_events(mut self, max_events: i64) -> Self {
        self.max_events = max_events;
        self
    }

    /// Builder method: parse and set the time window from raw RFC3339 strings
    ///
    /// This is where filter-argument errors surface: a malformed bound aborts
    /// the invocation before any traversal begins.
    pub fn with_time_window(
        mut self,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<Self> {
        self.since = since.map(|s| parse_time_filter("since", s)).transpose()?;
        self.until = until.map(|s| parse_time_filter("until", s)).transpose()?;
        Ok(self)
    }

    /// True if any filter or detail option was supplied
    ///
    /// Controls whether the stats block is surfaced in the output.
    /// `max_events` alone does not count: it has no effect outside detail
    /// mode.
    pub fn has_filters(&self) -> bool {
        !self.resource_id.is_empty()
            || !self.resource_key.is_empty()
            || !self.step_names.is_empty()
            || self.since.is_some()
            || self.until.is_some()
            || self.detail
    }
}

/// Parse a single RFC3339 filter argument; fails closed on malformed input
fn parse_time_filter(field: &'static str, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|source| SummaryError::TimeFilterParse {
        field,
        value: value.to_string(),
        source,
    })
}
