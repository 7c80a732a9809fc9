//! On-disk report storage for callers of the analysis pipeline.
//!
//! The pipeline never persists anything itself; callers that want to look
//! reports up by id later use a [`ReportStore`]. Each report is one pretty
//! JSON file named `<report_id>.json`.

use std::path::{Path, PathBuf};

use crate::report::AnalysisResult;

/// Directory of saved analysis reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ReportError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| ReportError::Io {
            path: root.clone(),
            source: e,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a report with this id is (or would be) stored at.
    pub fn report_path(&self, report_id: &str) -> Result<PathBuf, ReportError> {
        validate_report_id(report_id)?;
        Ok(self.root.join(format!("{report_id}.json")))
    }

    /// Write a report, replacing any previous report with the same id.
    pub fn save(&self, result: &AnalysisResult) -> Result<PathBuf, ReportError> {
        let path = self.report_path(&result.report_id)?;
        let json = serde_json::to_string_pretty(result).map_err(|e| ReportError::Parse {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| ReportError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(report_id = %result.report_id, path = %path.display(), "Saved report");
        Ok(path)
    }

    /// Load a report by id.
    pub fn load(&self, report_id: &str) -> Result<AnalysisResult, ReportError> {
        let path = self.report_path(report_id)?;
        if !path.exists() {
            return Err(ReportError::NotFound {
                report_id: report_id.to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ReportError::Io {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ReportError::Parse { path, source: e })
    }

    /// Ids of all stored reports, newest first.
    ///
    /// Report ids begin with their UTC creation time, so reverse lexical
    /// order is reverse chronological order.
    pub fn list(&self) -> Result<Vec<String>, ReportError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| ReportError::Io {
            path: self.root.clone(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReportError::Io {
                path: self.root.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_report_id(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }
}

/// Report ids become file names, so only a conservative alphabet is allowed.
fn validate_report_id(report_id: &str) -> Result<(), ReportError> {
    let valid = !report_id.is_empty()
        && report_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ReportError::InvalidId {
            report_id: report_id.to_string(),
        })
    }
}

/// Errors that can occur when storing or loading reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("report not found: {report_id}")]
    NotFound { report_id: String },

    #[error("invalid report id: {report_id:?}")]
    InvalidId { report_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn report(id: &str) -> AnalysisResult {
        AnalysisResult {
            report_id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            source_filename: "run.mp4".to_string(),
            total_frames: 300,
            fps: 30.0,
            duration_seconds: 10.0,
            motion_events: 2,
            motion_score_mean: 4.5,
            motion_score_std: 1.25,
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path().join("reports")).unwrap();

        let saved = report("20240501120000-0a1b2c3d");
        let path = store.save(&saved).unwrap();
        assert!(path.ends_with("20240501120000-0a1b2c3d.json"));

        let loaded = store.load("20240501120000-0a1b2c3d").unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_missing_report_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("20240101000000-00000000"),
            Err(ReportError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path()).unwrap();
        for id in ["", "../secrets", "a/b", "name.json"] {
            assert!(
                matches!(store.load(id), Err(ReportError::InvalidId { .. })),
                "id {id:?}"
            );
        }
    }

    #[test]
    fn test_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path()).unwrap();
        store.save(&report("20240101000000-aaaaaaaa")).unwrap();
        store.save(&report("20240301000000-bbbbbbbb")).unwrap();
        store.save(&report("20240201000000-cccccccc")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            store.list().unwrap(),
            [
                "20240301000000-bbbbbbbb",
                "20240201000000-cccccccc",
                "20240101000000-aaaaaaaa",
            ]
        );
    }
}
