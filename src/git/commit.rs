use crate::config::AuthorInfo;
use crate::error::{Error, Result};
use crate::log_debug;

use chrono::Local;
use git2::{ErrorCode, IndexAddOption, Repository, Signature, Time};
use std::path::Path;

/// Message used for the initial commit
pub const BOILERPLATE_MESSAGE: &str = "Boilerplate";

/// Results from a stage-and-commit operation
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub commit_id: String,
    pub branch: String,
    pub files: usize,
}

/// Stages every path in the working tree at `root` and commits it.
///
/// # Arguments
///
/// * `root` - Working tree of an existing repository.
/// * `author` - Identity used as both author and committer.
/// * `message` - The commit message.
///
/// # Returns
///
/// A `CommitSummary` for the new commit. Fails with `Error::Stage` if the
/// index cannot be updated and with `Error::Commit` if there is nothing to
/// commit or the commit itself is rejected.
pub fn stage_and_commit(
    root: &Path,
    author: &AuthorInfo,
    message: &str,
) -> Result<CommitSummary> {
    let repo = Repository::open(root).map_err(|source| Error::RepoOpen {
        path: root.to_path_buf(),
        source,
    })?;
    if repo.workdir().is_none() {
        return Err(Error::Stage("repository has no working tree".to_string()));
    }

    let files = add_all(&repo)?;
    if files == 0 {
        return Err(Error::Commit("nothing to commit".to_string()));
    }

    commit(&repo, author, message, files)
}

fn add_all(repo: &Repository) -> Result<usize> {
    let stage_error = |e: git2::Error| Error::Stage(e.message().to_string());

    let mut index = repo.index().map_err(stage_error)?;
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .map_err(stage_error)?;
    index.write().map_err(stage_error)?;

    log_debug!("Staged {} entries", index.len());
    Ok(index.len())
}

fn commit(
    repo: &Repository,
    author: &AuthorInfo,
    message: &str,
    files: usize,
) -> Result<CommitSummary> {
    let commit_error = |e: git2::Error| Error::Commit(e.message().to_string());

    let signature = signature_now(author).map_err(commit_error)?;
    let mut index = repo.index().map_err(commit_error)?;
    let tree_id = index.write_tree().map_err(commit_error)?;
    let tree = repo.find_tree(tree_id).map_err(commit_error)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(commit_error)?),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
        Err(e) => return Err(commit_error(e)),
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let commit_oid = repo
        .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .map_err(commit_error)?;

    let branch = repo
        .head()
        .ok()
        .and_then(|head| head.shorthand().map(str::to_string))
        .unwrap_or_else(|| "HEAD".to_string());

    log_debug!("Created commit {} on {}", commit_oid, branch);

    Ok(CommitSummary {
        commit_id: commit_oid.to_string(),
        branch,
        files,
    })
}

/// Builds a signature for `author` stamped with the current local time.
fn signature_now(author: &AuthorInfo) -> Result<Signature<'static>, git2::Error> {
    let now = Local::now();
    let offset_minutes = now.offset().local_minus_utc() / 60;
    let time = Time::new(now.timestamp(), offset_minutes);
    Signature::new(&author.name, &author.email, &time)
}
