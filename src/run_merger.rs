use std::io::{BufWriter, Write};

use anyhow::{anyhow, Context};

use crate::config::Config;
use crate::run_set::RunSet;
use crate::sorted_run::SortedRun;
use crate::unmerged_run::UnmergedRun;

/// Two-way merge of sorted runs.
pub(crate) struct RunMerger<'a> {
    config: &'a Config,
}

impl<'a> RunMerger<'a> {
    pub(crate) fn new(config: &'a Config) -> RunMerger<'a> {
        RunMerger {
            config,
        }
    }

    /// Merge `first` and `second` into a new run. On equal keys the line from `first` goes first.
    ///
    /// Both inputs are released only after the merged run is completely written. On error they
    /// stay tracked in `runs`, as does the partially written output.
    pub(crate) fn merge(&self, first: SortedRun, second: SortedRun, runs: &mut RunSet) -> Result<SortedRun, anyhow::Error> {
        let extractor = self.config.extractor();
        let expected = first.lines() + second.lines();
        let (merged_file, path) = runs.create_run(self.config)?;
        log::debug!(
            "Merging {} ({} lines) and {} ({} lines) into {}",
            first.path().display(),
            first.lines(),
            second.path().display(),
            second.lines(),
            path.display(),
        );

        let mut merged_writer = BufWriter::new(merged_file);
        let mut first = UnmergedRun::new(first, extractor)?;
        let mut second = UnmergedRun::new(second, extractor)?;
        let mut merged_len: usize = 0;

        loop {
            let next = match (first.head_key(), second.head_key()) {
                (Some(first_key), Some(second_key)) => {
                    if first_key <= second_key {
                        &mut first
                    } else {
                        &mut second
                    }
                }
                _ => break,
            };
            if let Some(line_record) = next.line_record(extractor)? {
                writeln!(merged_writer, "{}", line_record.line())
                    .with_context(|| anyhow!("path: {}", path.display()))?;
                merged_len += 1;
            }
        }

        // at most one side still has lines
        merged_len += first.drain_into(&mut merged_writer)
            .with_context(|| anyhow!("path: {}", path.display()))?;
        merged_len += second.drain_into(&mut merged_writer)
            .with_context(|| anyhow!("path: {}", path.display()))?;
        merged_writer.flush()
            .with_context(|| anyhow!("path: {}", path.display()))?;
        drop(merged_writer);

        if merged_len != expected {
            log::warn!("Merged {} lines into {}, expected {}", merged_len, path.display(), expected);
        }

        runs.release(first.into_run())?;
        runs.release(second.into_run())?;
        Ok(SortedRun::new(path, merged_len))
    }
}
