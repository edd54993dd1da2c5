//! One-line summaries of what an operation did
use crate::operations::{Operation, TransformResult};
use crate::styles::StyleSheet;

/// Describe `result` in one line, for example
/// `dedup 4 lines, 3 unique (1 removed) -> fruit_dedup.txt`
#[must_use]
pub fn summary(result: &TransformResult, style: &StyleSheet) -> String {
    let original = style.count(result.original);
    let noun = lines(result.original);
    let output = style.path(&result.output);
    match result.operation {
        Operation::Sort => {
            format!("{} {original} {noun} -> {output}", style.operation("sorted"))
        }
        Operation::Deduplicate => format!(
            "{} {original} {noun}, {} unique ({} removed) -> {output}",
            style.operation("dedup"),
            style.count(result.retained),
            style.count(result.removed()),
        ),
        Operation::Subtract => format!(
            "{} {original} {noun}, removed {}, {} remaining -> {output}",
            style.operation("subtract"),
            style.count(result.removed()),
            style.count(result.retained),
        ),
    }
}

fn lines(n: usize) -> &'static str {
    if n == 1 {
        "line"
    } else {
        "lines"
    }
}
