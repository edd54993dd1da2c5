//! Code to parse the command line using `clap`, and definitions of the parsed
//! result
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::operations::SortOrder;
use crate::output::WriteMode;
use crate::styles::ColorChoice;

/// Returns the parsed command line: the `Args` return value's `op` field is
/// the operation requested, with its operands, and the remaining fields are
/// the global options.
#[must_use]
pub fn parsed() -> Args {
    Args::from(CliArgs::parse())
}

/// Like `parsed`, but from an explicit argument list (the first item is the
/// program name), reporting problems instead of exiting.
pub fn try_parsed_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(Args::from)
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// `op` is the operation requested
    pub op: OpName,
    /// Whether to color the summary
    pub color: ColorChoice,
    /// Overwrite an existing output file, or refuse to
    pub write_mode: WriteMode,
    /// Negative for `--quiet`, otherwise the number of `--verbose` flags
    pub verbosity: i8,
}

/// An operation and its operands
#[derive(Debug, PartialEq, Eq)]
pub enum OpName {
    /// Sort the lines of `file`
    Sort {
        /// The input file
        file: PathBuf,
        /// Ascending or descending
        order: SortOrder,
        /// BCP-47 or POSIX locale name given on the command line
        locale: Option<String>,
    },
    /// Remove repeated lines of `file`
    Dedup {
        /// The input file
        file: PathBuf,
        /// Track seen lines in a separate set (the default) or use an
        /// insertion-ordered set
        keep_order: bool,
    },
    /// Remove from `main` the lines of `filter`
    Subtract {
        /// The file whose lines are kept
        main: PathBuf,
        /// The file whose lines are removed from `main`
        filter: PathBuf,
    },
}

impl From<CliArgs> for Args {
    fn from(parsed: CliArgs) -> Self {
        let op = match parsed.command {
            CliName::Sort { descending, locale, file } => {
                let order = if descending { SortOrder::Descending } else { SortOrder::Ascending };
                OpName::Sort { file, order, locale }
            }
            CliName::Dedup { unordered, file } => OpName::Dedup { file, keep_order: !unordered },
            CliName::Subtract { main, filter } => OpName::Subtract { main, filter },
        };
        let write_mode =
            if parsed.no_clobber { WriteMode::NoClobber } else { WriteMode::Overwrite };
        let verbosity =
            if parsed.quiet { -1 } else { i8::try_from(parsed.verbose).unwrap_or(i8::MAX) };
        Args { op, color: parsed.color, write_mode, verbosity }
    }
}

#[derive(Debug, Parser)]
#[command(name = "linekit", version)]
/// Sort, deduplicate, or subtract the lines of text files. Results are
/// written next to the input, as UTF-8 with LF line endings, under a name
/// with `_sorted`, `_dedup` or `_subtracted` added before the extension.
struct CliArgs {
    #[command(subcommand)]
    command: CliName,
    /// Color the summary
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorChoice,
    /// Fail rather than replace an existing output file
    #[arg(long, global = true)]
    no_clobber: bool,
    /// Log more (repeat for even more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Print only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
/// Name of the requested operation, with its own arguments
enum CliName {
    /// Sort the lines of a file
    Sort {
        /// Sort from Z to A
        #[arg(short = 'r', long)]
        descending: bool,
        /// Locale whose collation rules to sort by, like `de-DE` or
        /// `sv_SE.UTF-8` (default: from LC_ALL, LC_COLLATE or LANG)
        #[arg(long, env = "LINEKIT_LOCALE")]
        locale: Option<String>,
        /// The file to sort
        file: PathBuf,
    },
    /// Remove repeated lines of a file, keeping the first of each
    Dedup {
        /// Deduplicate through an insertion-ordered set (same result)
        #[arg(long)]
        unordered: bool,
        /// The file to deduplicate
        file: PathBuf,
    },
    /// Remove from MAIN every line that occurs in FILTER
    Subtract {
        /// The file to remove lines from
        main: PathBuf,
        /// The file listing the lines to remove
        filter: PathBuf,
    },
}
