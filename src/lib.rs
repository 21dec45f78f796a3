//! Greenleeks - put a directory under git control
//!
//! Detects whether a directory is already tracked by git and, if not,
//! initializes a repository and records every file in a single initial
//! commit. A file-count ceiling guards against committing large trees by
//! accident.

#![allow(clippy::uninlined_format_args)] // Style preference

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod git;
pub mod logger;

// Re-export important structs and functions for easier testing
pub use cli::Options;
pub use commands::{Outcome, RunError, RunState, run};
pub use config::AuthorInfo;
pub use error::{Error, Result};
