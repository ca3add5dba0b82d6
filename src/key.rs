use std::str::FromStr;

use regex::Regex;

use crate::error::ParseKeyError;

/// Sort key of a line. Empty lines have no key and order before every integer key.
pub(crate) type Key = Option<i64>;

#[derive(Clone, Debug)]
pub(crate) struct KeyExtractor {
    delimiter: Regex,
}

impl KeyExtractor {
    pub(crate) fn new(delimiter: &str) -> Result<KeyExtractor, regex::Error> {
        Ok(
            KeyExtractor {
                delimiter: Regex::new(delimiter)?,
            }
        )
    }

    /// Parse the text before the first delimiter match as an integer.
    pub(crate) fn extract(&self, line: &str) -> Result<Key, ParseKeyError> {
        if line.is_empty() {
            return Ok(None);
        }

        let field = self.delimiter.splitn(line, 2).next().unwrap_or(line);
        let key = i64::from_str(field)
            .map_err(|e| ParseKeyError::new(line, field, e))?;
        Ok(Some(key))
    }
}
