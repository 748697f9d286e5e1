//! Rotating JSON audit files written at the end of each run.
//!
//! Two artifacts per run, `sync_log` and `discarded`. After each write only
//! the newest `retention` files of that artifact are kept.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopsync_core::{ActionCounts, DiscardedProduct, OutcomeEntry, RunResult};
use uuid::Uuid;

use crate::error::SyncError;

pub const SYNC_LOG_ARTIFACT: &str = "sync_log";
pub const DISCARDS_ARTIFACT: &str = "discarded";

#[derive(Debug, Serialize)]
struct SyncLogArtifact<'a> {
    run_id: Uuid,
    timestamp: DateTime<Utc>,
    counts: ActionCounts,
    deleted: usize,
    outcomes: &'a [OutcomeEntry],
}

#[derive(Debug, Serialize)]
struct DiscardsArtifact<'a> {
    total: usize,
    products: &'a [DiscardedProduct],
}

fn io_error(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::Audit {
        path: path.display().to_string(),
        source,
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: PathBuf,
    retention: usize,
}

impl AuditLog {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention: retention.max(1),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes both artifacts for a finished run.
    ///
    /// # Errors
    ///
    /// See [`Self::write_rotating`].
    pub async fn write_run_artifacts(
        &self,
        run_id: Uuid,
        result: &RunResult,
    ) -> Result<(), SyncError> {
        let sync_log = SyncLogArtifact {
            run_id,
            timestamp: result.finished_at,
            counts: result.counts,
            deleted: result.deleted,
            outcomes: &result.outcomes,
        };
        self.write_rotating(SYNC_LOG_ARTIFACT, result.finished_at, &sync_log)
            .await?;

        let discards = DiscardsArtifact {
            total: result.discards.len(),
            products: &result.discards,
        };
        self.write_rotating(DISCARDS_ARTIFACT, result.finished_at, &discards)
            .await?;
        Ok(())
    }

    /// Writes `value` as pretty JSON to `{base}_{timestamp}.json`, creating
    /// the directory if needed, then prunes older files of the same base.
    ///
    /// # Errors
    ///
    /// [`SyncError::AuditSerialize`] if `value` does not serialize,
    /// [`SyncError::Audit`] on any filesystem failure.
    pub async fn write_rotating<T: Serialize>(
        &self,
        base: &str,
        at: DateTime<Utc>,
        value: &T,
    ) -> Result<PathBuf, SyncError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        let body = serde_json::to_vec_pretty(value).map_err(SyncError::AuditSerialize)?;
        let path = self.dir.join(format!(
            "{base}_{}.json",
            at.format("%Y-%m-%dT%H-%M-%S-%9fZ")
        ));
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| io_error(&path, e))?;

        let removed = self.prune(base).await?;
        tracing::debug!(path = %path.display(), removed, "wrote audit artifact");
        Ok(path)
    }

    /// Deletes all but the newest `retention` files of `base`, newest by
    /// modification time, then by name.
    async fn prune(&self, base: &str) -> Result<usize, SyncError> {
        let prefix = format!("{base}_");
        let mut files: Vec<(SystemTime, String, PathBuf)> = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.dir, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(&prefix) || !name.ends_with(".json") {
                continue;
            }
            let path = entry.path();
            let modified = entry
                .metadata()
                .await
                .and_then(|m| m.modified())
                .map_err(|e| io_error(&path, e))?;
            files.push((modified, name, path));
        }

        files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        let mut removed = 0;
        for (_, _, path) in files.iter().skip(self.retention) {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| io_error(path, e))?;
            removed += 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use shopsync_core::Action;

    use super::*;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn files_of(dir: &Path, base: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(&format!("{base}_")))
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn creates_directory_and_writes_pretty_json() {
        let tmp = tempfile::tempdir().unwrap();
        let log = AuditLog::new(tmp.path().join("logs"), 5);
        let path = log
            .write_rotating("sync_log", base_time(), &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "sync_log_2025-03-01T12-00-00-000000000Z.json"
        );
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains('\n'), "expected pretty JSON: {body}");
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn keeps_only_newest_files_per_base() {
        let tmp = tempfile::tempdir().unwrap();
        let log = AuditLog::new(tmp.path(), 5);
        log.write_rotating("discarded", base_time(), &serde_json::json!({}))
            .await
            .unwrap();
        for i in 0..7 {
            log.write_rotating(
                "sync_log",
                base_time() + Duration::seconds(i),
                &serde_json::json!({"i": i}),
            )
            .await
            .unwrap();
        }

        let kept = files_of(tmp.path(), "sync_log");
        assert_eq!(kept.len(), 5);
        assert_eq!(kept[0], "sync_log_2025-03-01T12-00-02-000000000Z.json");
        assert_eq!(kept[4], "sync_log_2025-03-01T12-00-06-000000000Z.json");
        assert_eq!(files_of(tmp.path(), "discarded").len(), 1);
    }

    #[tokio::test]
    async fn writes_both_run_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let log = AuditLog::new(tmp.path(), 5);
        let mut counts = ActionCounts::default();
        counts.record(Action::Create);
        let result = RunResult {
            started_at: base_time(),
            finished_at: base_time(),
            counts,
            deleted: 2,
            outcomes: vec![OutcomeEntry {
                sku: "A".to_owned(),
                action: Action::Create,
                id: None,
                error: None,
            }],
            discards: Vec::new(),
        };
        let run_id = Uuid::new_v4();
        log.write_run_artifacts(run_id, &result).await.unwrap();

        let sync_log = files_of(tmp.path(), SYNC_LOG_ARTIFACT);
        assert_eq!(sync_log.len(), 1);
        let body: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(tmp.path().join(&sync_log[0])).unwrap(),
        )
        .unwrap();
        assert_eq!(body["run_id"], run_id.to_string());
        assert_eq!(body["counts"]["created"], 1);
        assert_eq!(body["deleted"], 2);
        assert_eq!(body["outcomes"][0]["action"], "create");

        let discards = files_of(tmp.path(), DISCARDS_ARTIFACT);
        assert_eq!(discards.len(), 1);
        let body: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(tmp.path().join(&discards[0])).unwrap(),
        )
        .unwrap();
        assert_eq!(body["total"], 0);
        assert!(body["products"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn directory_blocked_by_file_is_an_audit_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = AuditLog::new(&blocker, 5)
            .write_rotating("sync_log", base_time(), &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Audit { .. }), "got: {err:?}");
    }
}
