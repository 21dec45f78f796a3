use crate::cli::Options;
use crate::config::AuthorInfo;
use crate::error::{Error, Result};
use crate::files::count_files;
use crate::git::{self, BOILERPLATE_MESSAGE, CommitSummary};
use crate::{log_debug, log_info, log_warn};

use std::fmt;
use std::path::{Path, PathBuf};

/// Progress of a run, from start to a terminal state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ConfigLoaded,
    Checked,
    AlreadyTracked,
    Initialized,
    Counted,
    Committed,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ConfigLoaded => "config-loaded",
            Self::Checked => "checked",
            Self::AlreadyTracked => "already-tracked",
            Self::Initialized => "initialized",
            Self::Counted => "counted",
            Self::Committed => "committed",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl RunState {
    /// The step attempted after reaching this state
    pub fn pending_step(self) -> &'static str {
        match self {
            Self::Idle => "load git config",
            Self::ConfigLoaded => "check repository state",
            Self::Checked => "initialize git repository",
            Self::Initialized => "count files",
            Self::Counted => "stage and commit files",
            Self::AlreadyTracked | Self::Committed | Self::Done | Self::Failed => "finish run",
        }
    }
}

/// A failed run: the error together with the last state reached before it
#[derive(Debug, thiserror::Error)]
#[error("failed to {}: {error}", .state.pending_step())]
pub struct RunError {
    pub state: RunState,
    pub error: Error,
}

impl RunError {
    /// The underlying error, without the step it happened in
    pub fn error(&self) -> &Error {
        &self.error
    }
}

/// How a successful run ended
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The directory was already tracked; nothing was changed
    AlreadyTracked { root: PathBuf },
    /// A repository was created and the initial commit written
    Committed {
        root: PathBuf,
        author: AuthorInfo,
        summary: CommitSummary,
    },
}

/// Walks a run through its states, recording the last one reached
struct Run<'a> {
    options: &'a Options,
    state: RunState,
}

impl<'a> Run<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            state: RunState::Idle,
        }
    }

    fn root(&self) -> &'a Path {
        &self.options.root
    }

    fn advance(&mut self, next: RunState) {
        log_debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    fn execute(&mut self) -> Result<Outcome> {
        let author = AuthorInfo::load(&self.options.gitconfig)?;
        self.advance(RunState::ConfigLoaded);

        let tracked = git::is_under_git_control(self.root())?;
        self.advance(RunState::Checked);

        if tracked {
            self.advance(RunState::AlreadyTracked);
            log_info!("Directory is already under git control.");
            match git::has_commits(self.root()) {
                Ok(true) => {}
                Ok(false) => log_warn!(
                    "Repository at {} has no commits; it may be left over from an interrupted run",
                    self.root().display()
                ),
                Err(e) => log_warn!("Could not inspect existing repository: {}", e),
            }
            return Ok(Outcome::AlreadyTracked {
                root: self.root().to_path_buf(),
            });
        }

        log_info!("Initializing git repository...");
        git::initialize_repository(self.root())?;
        self.advance(RunState::Initialized);

        let file_count = count_files(self.root(), self.options.max_files)?;
        log_debug!(
            "{} files found, limit is {}",
            file_count,
            self.options.max_files
        );
        self.advance(RunState::Counted);

        let summary = git::stage_and_commit(self.root(), &author, BOILERPLATE_MESSAGE)?;
        self.advance(RunState::Committed);

        log_info!("Git initialization successful.");
        Ok(Outcome::Committed {
            root: self.root().to_path_buf(),
            author,
            summary,
        })
    }
}

/// Put `options.root` under git control unless it already is.
///
/// Stops at the first failing step and reports it in the returned
/// `RunError`. A directory that is already tracked is left untouched and
/// reported as `Outcome::AlreadyTracked`.
pub fn run(options: &Options) -> Result<Outcome, RunError> {
    let span = tracing::info_span!("run", root = %options.root.display());
    let _guard = span.enter();

    let mut run = Run::new(options);
    match run.execute() {
        Ok(outcome) => {
            run.advance(RunState::Done);
            Ok(outcome)
        }
        Err(error) => {
            let failure = RunError {
                state: run.state,
                error,
            };
            log_debug!("Run failed after reaching state {}", failure.state);
            run.advance(RunState::Failed);
            Err(failure)
        }
    }
}
