use std::collections::VecDeque;
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use tempfile::Builder;

use crate::config::Config;
use crate::sorted_run::SortedRun;

/// Temporary files of a single sort invocation.
///
/// Holds the FIFO queue of runs waiting to be merged and, separately, the path of every temporary
/// file created through [RunSet::create_run] that has not been released yet. A run taken off the
/// queue stays tracked until it is released, so a failed merge leaves its inputs discoverable for
/// [RunSet::cleanup]. Dropping the set runs the cleanup.
#[derive(Debug, Default)]
pub(crate) struct RunSet {
    pending: VecDeque<SortedRun>,
    tracked: Vec<PathBuf>,
}

impl RunSet {
    pub(crate) fn new() -> RunSet {
        RunSet::default()
    }

    /// Create and register a new temporary file. The path is tracked before the caller writes
    /// anything to the returned file.
    pub(crate) fn create_run(&mut self, config: &Config) -> Result<(File, PathBuf), anyhow::Error> {
        let tmp_file = Builder::new()
            .prefix(config.tmp_prefix())
            .suffix(config.tmp_suffix())
            .tempfile_in(config.tmp())
            .with_context(|| anyhow!("Failed to create temp file in {}", config.tmp().display()))?;
        let (file, path) = tmp_file
            .keep()
            .with_context(|| anyhow!("Failed to persist temp file in {}", config.tmp().display()))?;
        self.tracked.push(path.clone());
        Ok((file, path))
    }

    pub(crate) fn enqueue(&mut self, run: SortedRun) {
        self.pending.push_back(run);
    }

    pub(crate) fn dequeue(&mut self) -> Option<SortedRun> {
        self.pending.pop_front()
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> &[PathBuf] {
        &self.tracked
    }

    /// Delete a consumed run and stop tracking it. On failure the run stays tracked.
    pub(crate) fn release(&mut self, run: SortedRun) -> Result<(), anyhow::Error> {
        std::fs::remove_file(run.path())
            .with_context(|| anyhow!("Failed to delete run {}", run.path().display()))?;
        self.tracked.retain(|path| path != run.path());
        Ok(())
    }

    /// Best effort removal of every tracked file. Individual failures are logged and skipped.
    /// Returns the number of files removed.
    pub(crate) fn cleanup(&mut self) -> usize {
        self.pending.clear();
        let mut removed = 0;
        for path in self.tracked.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    log::warn!("Failed to remove temp file {}: {}", path.display(), e);
                }
            }
        }
        removed
    }
}

impl Drop for RunSet {
    fn drop(&mut self) {
        let removed = self.cleanup();
        if removed > 0 {
            log::debug!("Removed {} temp files on drop", removed);
        }
    }
}
