//! Naming and writing output files.
//!
//! Output is always UTF-8 without a Byte Order Mark, with `\n` line
//! terminators, whatever the input looked like. A file read as GBK and
//! written back out therefore changes its bytes even if no line changed.
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{LineError, Result};

/// What to do when the output file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace it
    #[default]
    Overwrite,
    /// Leave it alone and fail with `LineError::OutputExists`
    NoClobber,
}

/// Returns `path` with `_{suffix}` inserted before its extension:
/// `notes/list.txt` becomes `notes/list_sorted.txt` for suffix `sorted`.
///
/// The extension starts at the file name's last `.`, unless everything before
/// that `.` is dots too, so `.bashrc` has no extension and becomes
/// `.bashrc_sorted`. A name ending in `.` keeps the `.`: `list.` becomes
/// `list_sorted.`.
pub fn derived_path(path: &Path, suffix: &str) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(LineError::NotAFile { path: path.to_owned() });
    };
    let (stem, extension) = split_extension(name);
    let mut derived = stem.to_os_string();
    derived.push("_");
    derived.push(suffix);
    if let Some(extension) = extension {
        derived.push(".");
        derived.push(extension);
    }
    Ok(path.with_file_name(derived))
}

fn split_extension(name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let as_path = Path::new(name);
    match (as_path.file_stem(), as_path.extension()) {
        (Some(stem), Some(extension)) if !is_all_dots(stem) => (stem, Some(extension)),
        _ => (name, None),
    }
}

fn is_all_dots(stem: &OsStr) -> bool {
    stem.to_str().is_some_and(|s| s.bytes().all(|b| b == b'.'))
}

/// The bytes `write_lines` writes: lines joined by `\n`, with a final `\n`
/// unless there are no lines at all.
#[must_use]
pub fn render<S: AsRef<str>>(lines: &[S]) -> Vec<u8> {
    let size = lines.iter().map(|line| line.as_ref().len() + 1).sum();
    let mut content = Vec::with_capacity(size);
    for line in lines {
        content.extend_from_slice(line.as_ref().as_bytes());
        content.push(b'\n');
    }
    content
}

/// Write `lines` to `path`.
///
/// The content goes to a temporary file in the same directory, which is
/// synced and then renamed to `path`. If anything fails, the temporary file
/// is removed and `path` is left as it was.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S], mode: WriteMode) -> Result<()> {
    let content = render(lines);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = temp_file_in(dir).map_err(|e| LineError::writing(path, e))?;
    temp.write_all(&content).map_err(|e| LineError::writing(path, e))?;
    temp.as_file().sync_all().map_err(|e| LineError::writing(path, e))?;

    let persisted = match mode {
        WriteMode::Overwrite => temp.persist(path),
        WriteMode::NoClobber => temp.persist_noclobber(path),
    };
    if let Err(failure) = persisted {
        return Err(match failure.error.kind() {
            io::ErrorKind::AlreadyExists => LineError::OutputExists { path: path.to_owned() },
            _ => LineError::writing(path, failure.error),
        });
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}

/// `NamedTempFile` creates files readable only by their owner; ours are
/// destined to become ordinary output files, so ask for the usual mode and
/// let the umask trim it.
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".linekit-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
