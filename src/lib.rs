//! linekit sorts, deduplicates, and subtracts the lines of text files.
//!
//! The `operations` module is the kernel of the application: `sort_file`,
//! `deduplicate_file`, and `subtract_files` each read a whole file with
//! `decode::read_lines`, transform its lines in memory, and write the result
//! next to the input with `output::write_lines`. The `args` module parses the
//! command line for the `linekit` binary, and `report` and `styles` turn
//! results into the summary it prints.
//!
//! Current Limitations:
//! * Files are read into memory in their entirety.
//! * Output is always UTF-8 with `\n` line endings. We recognize UTF-8 (with
//!   or without a Byte Order Mark), GBK, and GB18030 input, and decode
//!   anything else as Latin-1, which never fails but may well be wrong.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

pub mod args;
pub mod collate;
pub mod decode;
pub mod error;
pub mod locale;
pub mod logging;
pub mod operations;
pub mod output;
pub mod report;
pub mod styles;

pub use crate::collate::LineComparator;
pub use crate::decode::{read_lines, Decoded};
pub use crate::error::{LineError, Result};
pub use crate::operations::{
    deduplicate_file, deduplicate_lines, sort_file, sort_lines, subtract_files, subtract_lines,
    Operation, SortOrder, TransformResult,
};
pub use crate::output::{derived_path, write_lines, WriteMode};
