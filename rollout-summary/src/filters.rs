//! Identity and time-window filter predicates
//!
//! Pure functions over individual resources and events. All three follow the
//! same convention as the rest of the filter surface: an empty/unset filter
//! matches everything.
//!
//! Error asymmetry: a malformed *event* timestamp inside the snapshot makes
//! the time-window predicate fail OPEN (the event is retained), because
//! silently dropping operator-visible diagnostics is worse than occasionally
//! showing an event outside the requested window. Malformed *filter
//! arguments* fail closed in the options layer instead.

use crate::types::{ResourceExecution, WorkflowEvent};
use chrono::{DateTime, FixedOffset};

/// Check whether a resource passes the id/key filters
///
/// Both conditions are AND'd: when both are supplied the resource must
/// satisfy both; when neither is supplied every resource passes.
pub fn matches_resource(
    resource: &ResourceExecution,
    resource_id: &str,
    resource_key: &str,
) -> bool {
    if !resource_id.is_empty() && resource.resource_id != resource_id {
        return false;
    }
    if !resource_key.is_empty() && resource.resource_key != resource_key {
        return false;
    }
    true
}

/// Check whether a step name passes the step-name filter
///
/// Case-insensitive exact match against any entry; an empty list matches
/// every step.
pub fn matches_step_name(step_name: &str, allowed_names: &[String]) -> bool {
    if allowed_names.is_empty() {
        return true;
    }
    allowed_names
        .iter()
        .any(|name| name.eq_ignore_ascii_case(step_name))
}

/// Check whether an event falls inside the [since, until) window
///
/// `since` is inclusive, `until` exclusive. An event whose timestamp does
/// not parse as RFC3339 is retained (fail open).
pub fn matches_time_window(
    event: &WorkflowEvent,
    since: Option<&DateTime<FixedOffset>>,
    until: Option<&DateTime<FixedOffset>>,
) -> bool {
    if since.is_none() && until.is_none() {
        return true;
    }

    let timestamp = match DateTime::parse_from_rfc3339(&event.event_time) {
        Ok(t) => t,
        Err(e) => {
            log::debug!(
                "Event timestamp {:?} is not RFC3339 ({}), retaining event",
                event.event_time,
                e
            );
            return true;
        }
    };

    if let Some(since) = since {
        if timestamp < *since {
            return false;
        }
    }
    if let Some(until) = until {
        if timestamp >= *until {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, key: &str) -> ResourceExecution {
        ResourceExecution {
            resource_id: id.to_string(),
            resource_key: key.to_string(),
            resource_name: format!("{}-name", key),
            steps: vec![],
        }
    }

    fn event_at(time: &str) -> WorkflowEvent {
        WorkflowEvent::new(time, "Debug", "msg")
    }

    fn bound(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_resource_filter_no_selectors_passes_everything() {
        assert!(matches_resource(&resource("res-1", "web"), "", ""));
    }

    #[test]
    fn test_resource_filter_id_and_key_are_anded() {
        let r = resource("res-1", "web");
        assert!(matches_resource(&r, "res-1", ""));
        assert!(matches_resource(&r, "", "web"));
        assert!(matches_resource(&r, "res-1", "web"));
        assert!(!matches_resource(&r, "res-2", "web"));
        assert!(!matches_resource(&r, "res-1", "db"));
        assert!(!matches_resource(&r, "res-2", ""));
    }

    #[test]
    fn test_step_name_filter_is_case_insensitive() {
        let allowed = vec!["Bootstrap".to_string(), "deployment".to_string()];
        assert!(matches_step_name("bootstrap", &allowed));
        assert!(matches_step_name("BOOTSTRAP", &allowed));
        assert!(matches_step_name("Deployment", &allowed));
        assert!(!matches_step_name("Network", &allowed));
    }

    #[test]
    fn test_step_name_filter_empty_list_passes_everything() {
        assert!(matches_step_name("anything", &[]));
    }

    #[test]
    fn test_time_window_no_bounds_passes_everything() {
        assert!(matches_time_window(&event_at("not a timestamp"), None, None));
    }

    #[test]
    fn test_time_window_since_inclusive_until_exclusive() {
        let since = bound("2024-05-01T10:00:00Z");
        let until = bound("2024-05-01T11:00:00Z");

        assert!(matches_time_window(
            &event_at("2024-05-01T10:00:00Z"),
            Some(&since),
            Some(&until)
        ));
        assert!(matches_time_window(
            &event_at("2024-05-01T10:59:59Z"),
            Some(&since),
            Some(&until)
        ));
        assert!(!matches_time_window(
            &event_at("2024-05-01T11:00:00Z"),
            Some(&since),
            Some(&until)
        ));
        assert!(!matches_time_window(
            &event_at("2024-05-01T09:59:59Z"),
            Some(&since),
            Some(&until)
        ));
    }

    #[test]
    fn test_time_window_respects_offsets() {
        // 12:00+02:00 is 10:00Z, right on the inclusive lower bound
        let since = bound("2024-05-01T10:00:00Z");
        assert!(matches_time_window(
            &event_at("2024-05-01T12:00:00+02:00"),
            Some(&since),
            None
        ));
        assert!(!matches_time_window(
            &event_at("2024-05-01T11:59:59+02:00"),
            Some(&since),
            None
        ));
    }

    #[test]
    fn test_malformed_event_timestamp_fails_open() {
        let since = bound("2024-05-01T10:00:00Z");
        let until = bound("2024-05-01T11:00:00Z");
        assert!(matches_time_window(
            &event_at("garbage"),
            Some(&since),
            Some(&until)
        ));
    }
}
