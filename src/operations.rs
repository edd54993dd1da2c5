//! Houses the three line operations, in two flavors:
//!
//! * `sort_lines`, `deduplicate_lines` and `subtract_lines` work on lines
//!   already in memory and return borrowed views of them, and
//! * `sort_file`, `deduplicate_file` and `subtract_files` read their input
//!   with `read_lines`, call the in-memory version, and write the result next
//!   to the input under a derived name.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::collate::LineComparator;
use crate::decode::read_lines;
use crate::error::Result;
use crate::output::{derived_path, write_lines, WriteMode};

/// The operations, each with the suffix used to name its output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Sort the lines
    Sort,
    /// Remove repeated lines, keeping the first occurrence
    Deduplicate,
    /// Remove the lines that occur in a second file
    Subtract,
}

impl Operation {
    /// `sorted`, `dedup` or `subtracted`
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Operation::Sort => "sorted",
            Operation::Deduplicate => "dedup",
            Operation::Subtract => "subtracted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Sort => "sort",
            Operation::Deduplicate => "dedup",
            Operation::Subtract => "subtract",
        };
        f.write_str(name)
    }
}

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest key first
    #[default]
    Ascending,
    /// Largest key first
    Descending,
}

/// What a file operation did: how many lines it read from the (main) input,
/// how many it wrote, and where it wrote them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// The operation performed
    pub operation: Operation,
    /// Lines in the (main) input file
    pub original: usize,
    /// Lines written to `output`
    pub retained: usize,
    /// The derived output path
    pub output: PathBuf,
}

impl TransformResult {
    /// Lines dropped by the operation (always zero for a sort)
    #[must_use]
    pub fn removed(&self) -> usize {
        self.original - self.retained
    }
}

/// Returns `lines` sorted by `comparator`.
///
/// The sort is stable. For `SortOrder::Descending` each comparison is
/// reversed, rather than the ascending result, so lines with equal keys keep
/// their original relative order in both directions.
#[must_use]
pub fn sort_lines<'a>(
    lines: &'a [String],
    order: SortOrder,
    comparator: &LineComparator,
) -> Vec<&'a str> {
    let mut keyed: Vec<_> =
        lines.iter().map(|line| (comparator.sort_key(line), line.as_str())).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = comparator.compare_keys(a, b);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    keyed.into_iter().map(|(_, line)| line).collect()
}

/// Returns the first occurrence of each distinct line of `lines`, in the
/// order of those first occurrences. Lines are compared exactly: no trimming,
/// no case folding.
///
/// With `keep_order` we track the lines we've seen in a hash set; without it
/// we let an `IndexSet` do the work. Since `IndexSet` remembers insertion
/// order, the two give the same result.
#[must_use]
pub fn deduplicate_lines(lines: &[String], keep_order: bool) -> Vec<&str> {
    if keep_order {
        let mut seen = FxHashSet::default();
        lines.iter().map(String::as_str).filter(|line| seen.insert(*line)).collect()
    } else {
        let unique: IndexSet<&str, FxBuildHasher> = lines.iter().map(String::as_str).collect();
        unique.into_iter().collect()
    }
}

/// Returns the lines of `main` that don't occur anywhere in `filter`, in
/// their original order. Repeated lines of `main` are kept unless `filter`
/// removes them. Lines are compared exactly.
#[must_use]
pub fn subtract_lines<'a>(main: &'a [String], filter: &[String]) -> Vec<&'a str> {
    let unwanted: FxHashSet<&str> = filter.iter().map(String::as_str).collect();
    main.iter().map(String::as_str).filter(|line| !unwanted.contains(line)).collect()
}

/// Sort the lines of `path` into `{stem}_sorted{ext}`
pub fn sort_file(
    path: &Path,
    order: SortOrder,
    comparator: &LineComparator,
    mode: WriteMode,
) -> Result<TransformResult> {
    let lines = read_lines(path)?;
    tracing::debug!(?order, ?comparator, lines = lines.len(), "sorting");
    let sorted = sort_lines(&lines, order, comparator);
    finish(Operation::Sort, path, lines.len(), &sorted, mode)
}

/// Remove repeated lines of `path`, writing `{stem}_dedup{ext}`
pub fn deduplicate_file(path: &Path, keep_order: bool, mode: WriteMode) -> Result<TransformResult> {
    let lines = read_lines(path)?;
    let unique = deduplicate_lines(&lines, keep_order);
    finish(Operation::Deduplicate, path, lines.len(), &unique, mode)
}

/// Remove from `main` every line found in `filter`, writing
/// `{main stem}_subtracted{ext}`
pub fn subtract_files(main: &Path, filter: &Path, mode: WriteMode) -> Result<TransformResult> {
    let main_lines = read_lines(main)?;
    let filter_lines = read_lines(filter)?;
    let remaining = subtract_lines(&main_lines, &filter_lines);
    finish(Operation::Subtract, main, main_lines.len(), &remaining, mode)
}

fn finish(
    operation: Operation,
    input: &Path,
    original: usize,
    result: &[&str],
    mode: WriteMode,
) -> Result<TransformResult> {
    let output = derived_path(input, operation.suffix())?;
    write_lines(&output, result, mode)?;
    tracing::info!(
        %operation,
        original,
        retained = result.len(),
        output = %output.display(),
        "done"
    );
    Ok(TransformResult { operation, original, retained: result.len(), output })
}
