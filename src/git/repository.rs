use crate::error::{Error, Result};
use crate::log_debug;

use git2::{ErrorCode, Repository};
use std::path::Path;

/// Checks whether `root` already belongs to a git repository.
///
/// Parent directories are searched for a `.git` marker, so a subdirectory of
/// a working tree counts as tracked.
///
/// # Returns
///
/// `Ok(true)` when a repository with a working tree is found, `Ok(false)`
/// when there is none (or only a bare one), and an error for any other
/// failure to open it.
pub fn is_under_git_control(root: &Path) -> Result<bool> {
    match Repository::discover(root) {
        Ok(repo) if repo.is_bare() => {
            log_debug!("Found bare repository at {}", repo.path().display());
            Ok(false)
        }
        Ok(repo) => {
            log_debug!("Found repository at {}", repo.path().display());
            Ok(true)
        }
        Err(err) if err.code() == ErrorCode::NotFound => Ok(false),
        Err(source) => Err(Error::RepoOpen {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Creates a new non-bare repository at `root`.
pub fn initialize_repository(root: &Path) -> Result<Repository> {
    let repo = Repository::init(root).map_err(|source| Error::RepoInit {
        path: root.to_path_buf(),
        source,
    })?;
    log_debug!("Initialized repository at {}", repo.path().display());
    Ok(repo)
}

/// Returns whether the repository containing `root` has at least one commit.
///
/// A freshly initialized repository has an unborn `HEAD` and reports `false`.
pub fn has_commits(root: &Path) -> Result<bool> {
    let open_error = |source| Error::RepoOpen {
        path: root.to_path_buf(),
        source,
    };

    let repo = Repository::discover(root).map_err(open_error)?;
    match repo.head() {
        Ok(_) => Ok(true),
        Err(err) if matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            Ok(false)
        }
        Err(source) => Err(open_error(source)),
    }
}
