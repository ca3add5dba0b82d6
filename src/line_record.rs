use std::cmp::Ordering;

use crate::error::ParseKeyError;
use crate::key::{Key, KeyExtractor};

/// A line without its terminator, ordered solely by its key.
#[derive(Debug)]
pub(crate) struct LineRecord {
    line: String,
    key: Key,
}

impl LineRecord {
    pub(crate) fn new(line: String, extractor: &KeyExtractor) -> Result<LineRecord, ParseKeyError> {
        let key = extractor.extract(line.as_str())?;
        Ok(
            LineRecord {
                line,
                key,
            }
        )
    }

    pub(crate) fn key(&self) -> Key {
        self.key
    }

    pub(crate) fn line(self) -> String {
        self.line
    }
}

impl Eq for LineRecord {}

impl PartialEq<Self> for LineRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl PartialOrd<Self> for LineRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LineRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
