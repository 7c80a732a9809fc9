//! Per-analysis scratch directory.

use std::path::{Path, PathBuf};

use motionscope_common::error::{MotionError, MotionResult};
use tempfile::TempDir;

/// Private directory for sampled frames, removed when the guard goes away.
///
/// Each analysis creates its own guard, so concurrent analyses never share
/// a directory. Removal happens on every exit path: [`ScratchDir::release`]
/// on success surfaces deletion failures, and `Drop` handles everything
/// else (errors, panics, cancelled tasks) on a best-effort basis.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchDir {
    /// Create a fresh directory under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>) -> MotionResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("motionscope-");

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root).map_err(|e| MotionError::scratch_io(root, e))?;
                builder
                    .tempdir_in(root)
                    .map_err(|e| MotionError::scratch_io(root, e))?
            }
            None => builder
                .tempdir()
                .map_err(|e| MotionError::scratch_io(std::env::temp_dir(), e))?,
        };

        let path = dir.path().to_path_buf();
        tracing::debug!(path = %path.display(), "Created scratch directory");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it now.
    pub fn release(mut self) -> MotionResult<()> {
        match self.dir.take() {
            Some(dir) => {
                dir.close().map_err(|e| MotionError::scratch_io(&self.path, e))?;
                tracing::debug!(path = %self.path.display(), "Removed scratch directory");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), "Removed scratch directory")
                }
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove scratch directory"
                ),
            }
        }
    }
}
