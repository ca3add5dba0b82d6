use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::{anyhow, Context};

use crate::chunk_reader::read_line;
use crate::key::{Key, KeyExtractor};
use crate::line_record::LineRecord;
use crate::sorted_run::SortedRun;

/// Sequential reader over a sorted run with one line of look-ahead.
#[derive(Debug)]
pub(crate) struct UnmergedRun {
    run: SortedRun,
    reader: BufReader<File>,
    head: Option<LineRecord>,
    line_number: usize,
}

impl UnmergedRun {
    pub(crate) fn new(run: SortedRun, extractor: &KeyExtractor) -> Result<UnmergedRun, anyhow::Error> {
        let file = File::open(run.path())
            .with_context(|| anyhow!("path: {}", run.path().display()))?;
        let mut unmerged_run = UnmergedRun {
            run,
            reader: BufReader::new(file),
            head: None,
            line_number: 0,
        };
        unmerged_run.head = unmerged_run.read_record(extractor)?;
        Ok(unmerged_run)
    }

    /// Key of the pending line, or None when the run is exhausted. An empty pending line has
    /// `Some(None)`.
    pub(crate) fn head_key(&self) -> Option<Key> {
        self.head.as_ref().map(|line_record| line_record.key())
    }

    /// Take the pending line and read the next one.
    pub(crate) fn line_record(&mut self, extractor: &KeyExtractor) -> Result<Option<LineRecord>, anyhow::Error> {
        let next = self.read_record(extractor)?;
        Ok(std::mem::replace(&mut self.head, next))
    }

    /// Copy the pending line and everything after it to `writer` without extracting keys.
    pub(crate) fn drain_into<W: Write>(&mut self, writer: &mut W) -> Result<usize, anyhow::Error> {
        let mut lines = 0;
        if let Some(line_record) = self.head.take() {
            writeln!(writer, "{}", line_record.line())?;
            lines += 1;
        }
        let mut line = String::new();
        while self.next_line(&mut line)? {
            writeln!(writer, "{}", line)?;
            lines += 1;
        }
        Ok(lines)
    }

    pub(crate) fn into_run(self) -> SortedRun {
        self.run
    }

    fn next_line(&mut self, line: &mut String) -> Result<bool, anyhow::Error> {
        let more = read_line(&mut self.reader, line)
            .with_context(|| anyhow!("path: {}, line: {}", self.run.path().display(), self.line_number + 1))?;
        if more {
            self.line_number += 1;
        }
        Ok(more)
    }

    fn read_record(&mut self, extractor: &KeyExtractor) -> Result<Option<LineRecord>, anyhow::Error> {
        let mut line = String::new();
        if !self.next_line(&mut line)? {
            return Ok(None);
        }
        let line_record = LineRecord::new(line, extractor)
            .with_context(|| anyhow!("path: {}, line: {}", self.run.path().display(), self.line_number))?;
        Ok(Some(line_record))
    }
}
