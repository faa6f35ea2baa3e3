use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error};

use crate::core::error::{AppError, Result};

const SCRATCH_PREFIX: &str = "r2-upload-";

/// Per-invocation temp directory, removed with everything in it on drop.
///
/// Created before anything is written so every temp file is tracked even
/// when a later step fails.
pub struct ScratchDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchDir {
    /// Create a scratch directory under `root`, or the system temp dir
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| AppError::Internal(format!("Failed to create scratch directory: {}", e)))?;

        let path = dir.path().to_path_buf();
        debug!("Created scratch directory {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the scratch directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

impl ScratchDir {
    /// Remove the directory on the blocking pool. Failures are logged only.
    pub async fn remove(mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        match tokio::task::spawn_blocking(move || dir.close()).await {
            Ok(result) => log_cleanup(&self.path, result),
            Err(e) => error!(
                "Cleanup task for scratch directory {} failed: {}",
                self.path.display(),
                e
            ),
        }
    }
}

fn log_cleanup(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => debug!("Cleaned up scratch directory {}", path.display()),
        Err(e) => error!(
            "Failed to clean up scratch directory {}: {}",
            path.display(),
            e
        ),
    }
}

/// Fallback for paths that never reach `remove`, such as a cancelled request
impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            log_cleanup(&self.path, dir.close());
        }
    }
}
