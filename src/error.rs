//! Errors surfaced to callers of the library and to the CLI.
//!
//! Parsing and projection never fail; everything here comes from the edges:
//! locating the target file, reading and writing it, and loading selection plans.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures raised while locating, loading or persisting a document.
pub enum Error {
    /// The document to parse does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Neither the project nor the global document exists.
    #[error(
        "CLAUDE.md file not found. Checked:\n  - Project: {}\n  - Global: {}",
        .project.display(),
        .global.display()
    )]
    NoTarget {
        /// Candidate at the repository root.
        project: PathBuf,
        /// Candidate under the home directory.
        global: PathBuf,
    },

    /// Reading, copying or writing a file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A selection plan could not be (de)serialised.
    #[error("invalid selection plan: {0}")]
    Selection(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
