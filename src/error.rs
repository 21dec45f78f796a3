//! Error types shared by every step of a run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a run.
///
/// Each variant names the step that failed so the binary can report it once
/// and exit non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// The home directory could not be resolved while expanding `~`.
    #[error("failed to expand '{path}': home directory could not be determined")]
    ConfigExpand { path: String },

    /// The git configuration file could not be read.
    #[error("failed to read git config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The git configuration file was read but could not be parsed.
    #[error("failed to parse git config '{}': {source}", .path.display())]
    ConfigParse { path: PathBuf, source: git2::Error },

    #[error("failed to open repository at '{}': {source}", .path.display())]
    RepoOpen { path: PathBuf, source: git2::Error },

    #[error("failed to initialize git repository at '{}': {source}", .path.display())]
    RepoInit { path: PathBuf, source: git2::Error },

    /// The safety gate tripped. Not a bug: the directory is too large to
    /// commit automatically.
    #[error("too many files ({count}), limit is {limit}")]
    FileCountLimitExceeded { count: usize, limit: usize },

    #[error("failed to walk '{}': {source}", .path.display())]
    WalkIo { path: PathBuf, source: ignore::Error },

    #[error("failed to add all files: {0}")]
    Stage(String),

    #[error("failed to commit: {0}")]
    Commit(String),

    #[error("failed to set up logging: {0}")]
    LogSetup(String),
}

impl Error {
    /// Whether this error is the deliberate file-count abort rather than a
    /// failure of the filesystem or the repository.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::FileCountLimitExceeded { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
