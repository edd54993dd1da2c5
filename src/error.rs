//! The `LineError` type returned by every fallible engine function
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can go wrong while reading, transforming or writing lines.
/// Each variant carries the path involved, so the message can stand on its
/// own when shown to a user.
#[derive(Debug, Error)]
pub enum LineError {
    /// The path doesn't exist
    #[error("File not found: {}", .path.display())]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// The path exists but isn't a regular file (or has no file name we could
    /// derive an output name from)
    #[error("Not a regular file: {}", .path.display())]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },

    /// Reading or writing failed for some reason other than a missing path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being read or written
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// No encoding candidate could decode the file. The Latin-1 stage accepts
    /// every byte sequence, so this only happens if that stage is removed.
    #[error("Can't determine the text encoding of {}", .path.display())]
    DecodeExhausted {
        /// The undecodable file
        path: PathBuf,
    },

    /// `WriteMode::NoClobber` was requested and the output already exists
    #[error("Output file already exists: {}", .path.display())]
    OutputExists {
        /// The existing output path
        path: PathBuf,
    },
}

impl LineError {
    /// Classify an `io::Error` raised while reading `path`: a missing file
    /// becomes `NotFound`, anything else `Io`.
    pub(crate) fn reading(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LineError::NotFound { path: path.to_owned() }
        } else {
            LineError::Io { path: path.to_owned(), source }
        }
    }

    /// Wrap an `io::Error` raised while writing `path`
    pub(crate) fn writing(path: &Path, source: std::io::Error) -> Self {
        LineError::Io { path: path.to_owned(), source }
    }
}

/// The engine's `Result` alias
pub type Result<T, E = LineError> = std::result::Result<T, E>;
