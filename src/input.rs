//! Loading documents from disk and deciding which document to edit.
//!
//! Without an explicit path we look for a project `CLAUDE.md` at the repository root first and
//! fall back to the user's global one under `~/.claude`.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::outline::Outline;
use crate::parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Reads a document as lines, keeping each line's terminator.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file is missing, or an I/O error if it cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(split_lines(&content))
}

#[must_use]
/// Splits text into lines, keeping each line's terminator.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split_inclusive('\n')
        .map(ToString::to_string)
        .collect()
}

/// Reads and parses a document into its section outline.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable.
pub fn extract_sections<F: Format>(path: &Path, format: &F) -> Result<Outline> {
    let lines = read_lines(path)?;
    Ok(parser::parse(lines, format))
}

/// Picks the document to edit.
///
/// An explicit path must exist. Otherwise the project document at the git root (or the
/// working directory outside a repository) wins over the global one.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for a missing explicit path and [`Error::NoTarget`] when no
/// default candidate exists.
pub fn resolve_target(explicit: Option<PathBuf>, cfg: &Config) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path);
        }
        return Err(Error::NotFound(path));
    }

    let project = git_root().join(&cfg.file_name);
    let global = global_dir().join(&cfg.file_name);
    pick_candidate(project, global)
}

fn pick_candidate(project: PathBuf, global: PathBuf) -> Result<PathBuf> {
    if project.exists() {
        Ok(project)
    } else if global.exists() {
        Ok(global)
    } else {
        Err(Error::NoTarget { project, global })
    }
}

fn git_root() -> PathBuf {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output();

    match output {
        Ok(out) if out.status.success() => {
            PathBuf::from(String::from_utf8_lossy(&out.stdout).trim())
        }
        _ => {
            tracing::debug!("not inside a git repository, using working directory");
            PathBuf::from(".")
        }
    }
}

fn global_dir() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".claude")
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
