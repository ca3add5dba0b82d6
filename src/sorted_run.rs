use std::path::PathBuf;

/// Handle of a temporary file holding lines in non-decreasing key order.
#[derive(Debug)]
pub(crate) struct SortedRun {
    path: PathBuf,
    lines: usize,
}

impl SortedRun {
    pub(crate) fn new(path: PathBuf, lines: usize) -> SortedRun {
        SortedRun {
            path,
            lines,
        }
    }

    pub(crate) fn path(&self) -> &PathBuf {
        &self.path
    }

    pub(crate) fn lines(&self) -> usize {
        self.lines
    }
}
