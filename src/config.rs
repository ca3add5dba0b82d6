use std::path::PathBuf;

use crate::key::KeyExtractor;

#[derive(Clone, Debug)]
pub(crate) struct Config {
    tmp: PathBuf,
    tmp_prefix: String,
    tmp_suffix: String,
    extractor: KeyExtractor,
    chunk_lines: usize,
}

impl Config {
    pub(crate) fn new(
        tmp: PathBuf,
        tmp_prefix: String,
        tmp_suffix: String,
        extractor: KeyExtractor,
        chunk_lines: usize,
    ) -> Config {
        Config {
            tmp,
            tmp_prefix,
            tmp_suffix,
            extractor,
            chunk_lines,
        }
    }

    pub(crate) fn tmp(&self) -> &PathBuf {
        &self.tmp
    }

    pub(crate) fn tmp_prefix(&self) -> &String {
        &self.tmp_prefix
    }

    pub(crate) fn tmp_suffix(&self) -> &String {
        &self.tmp_suffix
    }

    pub(crate) fn extractor(&self) -> &KeyExtractor {
        &self.extractor
    }

    pub(crate) fn chunk_lines(&self) -> usize {
        self.chunk_lines
    }
}

#[cfg(test)]
impl Config {
    pub(crate) fn for_tmp_dir(tmp: &std::path::Path, chunk_lines: usize) -> Config {
        Config::new(
            tmp.to_path_buf(),
            "run-".to_string(),
            ".sorted".to_string(),
            KeyExtractor::new(",").unwrap(),
            chunk_lines,
        )
    }
}
