//! This crate implements an external sort of delimited text files, such as CSV, by the integer
//! value of the first column.
//!
//! Every line is a record. The sort key is the text before the first occurrence of the delimiter,
//! parsed as a signed 64 bit integer; the rest of the line is never interpreted. Files larger
//! than the available memory are sorted by splitting them into chunks of a bounded number of
//! lines, sorting each chunk in memory into a temporary file, and merging the temporary files
//! two at a time until one sorted file is left.
//!
//! * Lines with equal keys keep their input order.
//! * Empty lines have no key and sort before all other lines.
//! * A non-empty line whose key is not an integer aborts the sort with
//!   [error::ParseKeyError].
//! * Temporary files are removed whether the sort succeeds or fails.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use csv_file_sort::sort::Sort;
//!
//! fn sort_records(input: PathBuf, output: PathBuf, tmp: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut csv_file_sort = Sort::new(input, output);
//!
//!     // set the directory for intermediate results. The default is the system temp dir -
//!     // std::env::temp_dir(), however, for large files it is recommended to provide a dedicated
//!     // directory for intermediate files.
//!     csv_file_sort.with_tmp_dir(tmp);
//!
//!     csv_file_sort.sort()
//! }
//! ```
//!

pub(crate) mod chunk_reader;
pub(crate) mod chunk_sorter;
pub(crate) mod config;
pub(crate) mod key;
pub(crate) mod line_record;
pub(crate) mod run_merger;
pub(crate) mod run_set;
pub(crate) mod sorted_run;
pub(crate) mod unmerged_run;

pub mod error;
pub mod sort;
