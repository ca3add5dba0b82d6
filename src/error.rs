use std::num::ParseIntError;

/// The leading column of a non-empty line is not a base-10 integer.
///
/// Returned wrapped in an [anyhow::Error]; use `downcast_ref::<ParseKeyError>()` to tell it apart
/// from I/O failures.
#[derive(Debug, thiserror::Error)]
#[error("invalid integer key {key:?} in line {line:?}")]
pub struct ParseKeyError {
    line: String,
    key: String,
    #[source]
    source: ParseIntError,
}

impl ParseKeyError {
    pub(crate) fn new(line: &str, key: &str, source: ParseIntError) -> ParseKeyError {
        ParseKeyError {
            line: line.to_string(),
            key: key.to_string(),
            source,
        }
    }

    /// The offending line
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The text that failed to parse as a key
    pub fn key(&self) -> &str {
        &self.key
    }
}
