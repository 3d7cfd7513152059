//! Execution snapshot sources
//!
//! The summarizer needs a complete, already-materialized `WorkflowExecution`
//! snapshot. `ExecutionSource` is the seam where that snapshot comes from;
//! the shipped implementation reads a JSON export, which is also what the
//! orchestration service's API returns verbatim.

use anyhow::{Context, Result};
use rollout_summary::WorkflowExecution;
use std::fs;
use std::path::PathBuf;

/// A source of workflow execution snapshots
///
/// `fetch` returns `Ok(None)` when the requested workflow does not exist at
/// the source - the caller decides how to report that.
pub trait ExecutionSource {
    fn fetch(&self, workflow_id: Option<&str>) -> Result<Option<WorkflowExecution>>;
}

/// Snapshot source backed by a JSON file on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExecutionSource for FileSource {
    fn fetch(&self, workflow_id: Option<&str>) -> Result<Option<WorkflowExecution>> {
        log::info!("Loading execution snapshot: {:?}", self.path);

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot file: {:?}", self.path))?;

        let execution: WorkflowExecution = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot file: {:?}", self.path))?;

        if let Some(id) = workflow_id {
            if execution.workflow_id != id {
                log::debug!(
                    "Snapshot holds workflow {}, not {}",
                    execution.workflow_id,
                    id
                );
                return Ok(None);
            }
        }

        log::info!(
            "Snapshot loaded: workflow {} with {} resources",
            execution.workflow_id,
            execution.resources.len()
        );
        Ok(Some(execution))
    }
}

/// Load a snapshot, treating "not found" as a descriptive error
pub fn load_execution(
    source: &dyn ExecutionSource,
    workflow_id: Option<&str>,
) -> Result<WorkflowExecution> {
    source.fetch(workflow_id)?.ok_or_else(|| {
        anyhow::anyhow!(
            "Workflow execution {} not found at the snapshot source",
            workflow_id.unwrap_or("<any>")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "workflowId": "wf-1",
        "environmentId": "env-1",
        "serviceId": "svc-1",
        "resources": []
    }"#;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_source_loads_snapshot() {
        let file = snapshot_file();
        let source = FileSource::new(file.path());

        let execution = source.fetch(None).unwrap().unwrap();
        assert_eq!(execution.workflow_id, "wf-1");
    }

    #[test]
    fn test_file_source_matches_workflow_id() {
        let file = snapshot_file();
        let source = FileSource::new(file.path());

        assert!(source.fetch(Some("wf-1")).unwrap().is_some());
        assert!(source.fetch(Some("wf-2")).unwrap().is_none());
    }

    #[test]
    fn test_load_execution_reports_not_found() {
        let file = snapshot_file();
        let source = FileSource::new(file.path());

        let err = load_execution(&source, Some("wf-2")).unwrap_err();
        assert!(err.to_string().contains("wf-2"));
    }

    #[test]
    fn test_file_source_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let source = FileSource::new(file.path());

        assert!(source.fetch(None).is_err());
    }
}
