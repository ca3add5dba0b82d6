use std::io::{BufWriter, Write};

use anyhow::{anyhow, Context};

use crate::config::Config;
use crate::line_record::LineRecord;
use crate::run_set::RunSet;
use crate::sorted_run::SortedRun;

/// Sorts an in-memory batch of lines and persists it as a run.
pub(crate) struct ChunkSorter<'a> {
    config: &'a Config,
}

impl<'a> ChunkSorter<'a> {
    pub(crate) fn new(config: &'a Config) -> ChunkSorter<'a> {
        ChunkSorter {
            config,
        }
    }

    /// `first_line` is the input line number of `lines[0]`, used in error messages.
    pub(crate) fn sort_chunk(&self, lines: Vec<String>, first_line: usize, runs: &mut RunSet) -> Result<SortedRun, anyhow::Error> {
        let mut line_records = Vec::with_capacity(lines.len());
        for (n, line) in lines.into_iter().enumerate() {
            let line_record = LineRecord::new(line, self.config.extractor())
                .with_context(|| anyhow!("input line: {}", first_line + n))?;
            line_records.push(line_record);
        }
        // stable, equal keys keep their input order
        line_records.sort();

        let (chunk_file, path) = runs.create_run(self.config)?;
        let chunk_size = line_records.len();
        let mut buf_writer = BufWriter::new(chunk_file);
        for line_record in line_records {
            writeln!(buf_writer, "{}", line_record.line())
                .with_context(|| anyhow!("path: {}", path.display()))?;
        }
        buf_writer.flush()
            .with_context(|| anyhow!("path: {}", path.display()))?;
        log::debug!("Wrote sorted chunk of {} lines to {}", chunk_size, path.display());
        Ok(SortedRun::new(path, chunk_size))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::chunk_sorter::ChunkSorter;
    use crate::config::Config;
    use crate::error::ParseKeyError;
    use crate::run_set::RunSet;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sorted_and_stable() -> Result<(), anyhow::Error> {
        let tmp = TempDir::new()?;
        let config = Config::for_tmp_dir(tmp.path(), 10);
        let mut runs = RunSet::new();
        let chunk_sorter = ChunkSorter::new(&config);
        let run = chunk_sorter.sort_chunk(lines(&["5,a,b", "2,c,d", "", "5,e,f", "-1,g"]), 1, &mut runs)?;
        assert_eq!(run.lines(), 5);
        assert_eq!(runs.tracked(), &[run.path().clone()]);
        assert_eq!(fs::read_to_string(run.path())?, "\n-1,g\n2,c,d\n5,a,b\n5,e,f\n");
        Ok(())
    }

    #[test]
    fn test_parse_error_creates_no_run() -> Result<(), anyhow::Error> {
        let tmp = TempDir::new()?;
        let config = Config::for_tmp_dir(tmp.path(), 10);
        let mut runs = RunSet::new();
        let chunk_sorter = ChunkSorter::new(&config);
        let error = chunk_sorter.sort_chunk(lines(&["1,a", "x,y,z"]), 11, &mut runs).unwrap_err();
        assert!(error.downcast_ref::<ParseKeyError>().is_some());
        assert!(format!("{:#}", error).contains("input line: 12"));
        assert!(runs.tracked().is_empty());
        assert_eq!(fs::read_dir(tmp.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_tmp_dir() -> Result<(), anyhow::Error> {
        let tmp = TempDir::new()?;
        let config = Config::for_tmp_dir(&tmp.path().join("missing"), 10);
        let mut runs = RunSet::new();
        let chunk_sorter = ChunkSorter::new(&config);
        let error = chunk_sorter.sort_chunk(lines(&["1,a"]), 1, &mut runs).unwrap_err();
        assert!(error.downcast_ref::<std::io::Error>().is_some());
        Ok(())
    }
}
