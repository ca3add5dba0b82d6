use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{anyhow, Context};

/// Read one line into `line`, replacing its content and stripping a trailing `\n` or `\r\n`.
/// Returns false at end of input.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, line: &mut String) -> Result<bool, std::io::Error> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Ok(false);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(true)
}

/// Splits an input file into batches of at most `chunk_lines` lines.
///
/// Only the last batch may be shorter. An empty file yields no batches.
pub(crate) struct ChunkReader<R: BufRead = BufReader<File>> {
    path: PathBuf,
    reader: R,
    chunk_lines: usize,
    line_number: usize,
    done: bool,
}

impl ChunkReader {
    pub(crate) fn new(path: &PathBuf, chunk_lines: usize) -> Result<ChunkReader, anyhow::Error> {
        let file = File::open(path)
            .with_context(|| anyhow!("path: {}", path.display()))?;
        Ok(ChunkReader::from_reader(path.clone(), BufReader::new(file), chunk_lines))
    }
}

impl<R: BufRead> ChunkReader<R> {
    pub(crate) fn from_reader(path: PathBuf, reader: R, chunk_lines: usize) -> ChunkReader<R> {
        ChunkReader {
            path,
            reader,
            chunk_lines,
            line_number: 0,
            done: false,
        }
    }

    fn read_chunk(&mut self) -> Result<Vec<String>, anyhow::Error> {
        let mut lines = Vec::with_capacity(self.chunk_lines);
        let mut line = String::new();
        while lines.len() < self.chunk_lines {
            let more = read_line(&mut self.reader, &mut line)
                .with_context(|| anyhow!("path: {}, line: {}", self.path.display(), self.line_number + 1))?;
            if !more {
                self.done = true;
                break;
            }
            self.line_number += 1;
            lines.push(std::mem::take(&mut line));
        }
        Ok(lines)
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = Result<Vec<String>, anyhow::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_chunk() {
            Ok(lines) if lines.is_empty() => None,
            Ok(lines) => Some(Ok(lines)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
