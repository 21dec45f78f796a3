// Git module providing the repository operations a run needs

mod commit;
mod repository;

pub use commit::{BOILERPLATE_MESSAGE, CommitSummary, stage_and_commit};
pub use repository::{has_commits, initialize_repository, is_under_git_control};
