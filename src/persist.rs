//! Writing regenerated documents back to disk.
//!
//! The current file is always copied to a sibling backup before it is replaced, and the
//! replacement goes through a temporary file in the same directory so a crash mid-write never
//! leaves a truncated document behind.

use crate::error::Result;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[must_use]
/// Sibling path with `.{suffix}` appended to the full file name.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Backs up `path` and replaces it with `content`.
///
/// Returns where the backup was written.
///
/// # Errors
///
/// Returns an error if the backup copy or the replacement write fails. A failed backup leaves
/// the original untouched.
pub fn save(path: &Path, content: &str, suffix: &str) -> Result<PathBuf> {
    let backup = backup_path(path, suffix);
    fs::copy(path, &backup)?;
    tracing::info!(backup = %backup.display(), "wrote backup");

    atomic_write(path, content.as_bytes())?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(backup)
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    // The temp file is created owner-only; the replacement keeps the document's mode.
    let perms = fs::metadata(path)?.permissions();
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    fs::set_permissions(tmp.path(), perms)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
