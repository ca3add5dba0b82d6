use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

use crate::chunk_reader::{read_line, ChunkReader};
use crate::chunk_sorter::ChunkSorter;
use crate::config::Config;
use crate::key::{Key, KeyExtractor};
use crate::run_merger::RunMerger;
use crate::run_set::RunSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Chunking,
    Merging,
    Finalizing,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Chunking => write!(f, "chunking"),
            Phase::Merging => write!(f, "merging"),
            Phase::Finalizing => write!(f, "finalizing"),
        }
    }
}

/// Sort a delimited text file by the integer in its first column
///
/// Lines are read in chunks of at most `chunk_lines` lines; each chunk is sorted in memory and
/// written to a temporary file. The temporary files are then merged two at a time, oldest first,
/// until one remains, which is copied to the output path. Lines with equal keys keep their input
/// order and empty lines sort before all others.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use csv_file_sort::sort::Sort;
///
/// fn sort_records(input: PathBuf, output: PathBuf, tmp: PathBuf) -> Result<(), anyhow::Error> {
///     let mut csv_file_sort = Sort::new(input, output);
///     // the key is everything before the first match of this regex
///     csv_file_sort.with_delimiter(";");
///     // lines held in memory at once
///     csv_file_sort.with_chunk_lines(100_000);
///     // directory for intermediate results, std::env::temp_dir() by default
///     csv_file_sort.with_tmp_dir(tmp);
///     csv_file_sort.sort()
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    output: PathBuf,
    tmp: PathBuf,
    delimiter: String,
    chunk_lines: usize,
}

impl Sort {
    /// Create a default Sort definition.
    ///
    /// * intermediate files go to std::env::temp_dir()
    /// * the delimiter is ','
    /// * input is read in chunks of 10,000 lines
    pub fn new(input: PathBuf, output: PathBuf) -> Sort {
        Sort {
            input,
            output,
            tmp: std::env::temp_dir(),
            delimiter: ",".to_string(),
            chunk_lines: 10_000,
        }
    }

    /// Set directory for intermediate files. By default use std::env::temp_dir()
    pub fn with_tmp_dir(&mut self, tmp: PathBuf) {
        self.tmp = tmp;
    }

    /// Set the delimiter separating the key from the rest of the line. It is compiled as a
    /// regular expression and only its first match in a line is significant. The default is ','
    pub fn with_delimiter(&mut self, delimiter: &str) {
        self.delimiter = delimiter.to_string();
    }

    /// Set the maximum number of lines sorted in memory at once. Must be greater than zero.
    pub fn with_chunk_lines(&mut self, chunk_lines: usize) {
        self.chunk_lines = chunk_lines;
    }

    /// Sort the input file into the output file, overwriting it if it exists.
    ///
    /// Fails on the first I/O error or on a non-empty line whose first column is not an integer
    /// ([crate::error::ParseKeyError]). The output is only written once all input is merged, so on
    /// failure an existing output is left untouched. Temporary files are removed in either case.
    pub fn sort(&self) -> Result<(), anyhow::Error> {
        let config = self.create_config()?;
        log::info!("Start sorting {} into {}", self.input.display(), self.output.display());
        let mut runs = RunSet::new();
        let mut phase = Phase::Chunking;
        let result = self.internal_sort(&config, &mut runs, &mut phase);
        let removed = runs.cleanup();
        match &result {
            Ok(()) => {
                log::info!("Finish sorting {}, removed {} temp files", self.input.display(), removed);
            }
            Err(e) => {
                log::error!("Sort of {} failed while {}: {:#}, removed {} temp files", self.input.display(), phase, e, removed);
            }
        }
        result
    }

    /// Check whether the input file is already sorted. Nothing is written.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        let config = self.create_config()?;
        Self::internal_check(&self.input, &config)
    }

    fn create_config(&self) -> Result<Config, anyhow::Error> {
        if self.chunk_lines == 0 {
            return Err(anyhow!("Chunk size must be at least one line"));
        }
        let extractor = KeyExtractor::new(self.delimiter.as_str())
            .with_context(|| anyhow!("Invalid delimiter: {}", self.delimiter))?;
        Ok(
            Config::new(
                self.tmp.clone(),
                "run-".to_string(),
                ".sorted".to_string(),
                extractor,
                self.chunk_lines,
            )
        )
    }

    fn internal_sort(&self, config: &Config, runs: &mut RunSet, phase: &mut Phase) -> Result<(), anyhow::Error> {
        *phase = Phase::Chunking;
        let chunk_sorter = ChunkSorter::new(config);
        let mut first_line = 1;
        for chunk in ChunkReader::new(&self.input, config.chunk_lines())? {
            let chunk = chunk?;
            let chunk_size = chunk.len();
            let run = chunk_sorter.sort_chunk(chunk, first_line, runs)
                .with_context(|| anyhow!("path: {}", self.input.display()))?;
            first_line += chunk_size;
            runs.enqueue(run);
        }
        log::info!("Read {} lines into {} sorted chunks", first_line - 1, runs.pending());

        if runs.pending() == 0 {
            *phase = Phase::Finalizing;
            File::create(&self.output)
                .with_context(|| anyhow!("path: {}", self.output.display()))?;
            log::info!("Input {} is empty, created empty output", self.input.display());
            return Ok(());
        }

        *phase = Phase::Merging;
        let run_merger = RunMerger::new(config);
        while runs.pending() > 1 {
            let (first, second) = match (runs.dequeue(), runs.dequeue()) {
                (Some(first), Some(second)) => (first, second),
                _ => return Err(anyhow!("Expected two runs to merge")),
            };
            let merged = run_merger.merge(first, second, runs)?;
            runs.enqueue(merged);
        }

        *phase = Phase::Finalizing;
        let sorted = runs.dequeue()
            .ok_or_else(|| anyhow!("No sorted run left to finalize"))?;
        std::fs::copy(sorted.path(), &self.output)
            .with_context(|| anyhow!("Copy {} to {}", sorted.path().display(), self.output.display()))?;
        log::info!("Wrote {} sorted lines to {}", sorted.lines(), self.output.display());
        Ok(())
    }

    fn internal_check(path: &PathBuf, config: &Config) -> Result<bool, anyhow::Error> {
        let file = File::open(path)
            .with_context(|| anyhow!("path: {}", path.display()))?;
        let mut reader = std::io::BufReader::new(file);
        let mut line = String::new();
        let mut line_number = 0;
        let mut previous: Option<Key> = None;
        while read_line(&mut reader, &mut line)
            .with_context(|| anyhow!("path: {}, line: {}", path.display(), line_number + 1))? {
            line_number += 1;
            let current = config.extractor().extract(line.as_str())
                .with_context(|| anyhow!("path: {}, line: {}", path.display(), line_number))?;
            if let Some(previous) = previous {
                if previous > current {
                    log::info!("{} is not sorted at line {}", path.display(), line_number);
                    return Ok(false);
                }
            }
            previous = Some(current);
        }
        Ok(true)
    }
}
