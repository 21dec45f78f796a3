use crate::commands::{self, Outcome};
use crate::config::DEFAULT_GITCONFIG;
use crate::files::DEFAULT_MAX_FILES;
use crate::git::CommitSummary;
use crate::logger::{self, LogFormat};
use crate::{log_debug, log_info};

use anyhow::Context;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, crate_version};
use std::path::PathBuf;

/// Command-line options for a run
#[derive(Parser, Clone, Debug)]
#[command(
    name = "greenleeks",
    version = crate_version!(),
    about = "Put a directory under git control with an initial commit",
    long_about = "Checks whether a directory is already tracked by git. If it is not, initializes a repository, stages every file and creates a single 'Boilerplate' commit, refusing to commit directories with more files than --max-files.",
    styles = get_styles(),
)]
pub struct Options {
    /// Log format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Show verbose debug information, each -v bumps log level
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Root directory
    #[arg(short = 'r', long = "root", default_value = ".")]
    pub root: PathBuf,

    /// Maximum number of files allowed
    #[arg(long = "max-files", default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Path to the Git configuration file
    #[arg(long = "gitconfig", default_value = DEFAULT_GITCONFIG)]
    pub gitconfig: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            verbose: 0,
            root: PathBuf::from("."),
            max_files: DEFAULT_MAX_FILES,
            gitconfig: DEFAULT_GITCONFIG.to_string(),
        }
    }
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Set up logging for already parsed options and perform the run
pub fn main(options: &Options) -> anyhow::Result<()> {
    logger::init(options.log_format, options.verbose).context("failed to set up logging")?;
    log_debug!("Running with options: {:?}", options);

    if let Outcome::Committed { summary, .. } = commands::run(options)? {
        log_info!("{}", describe_commit(&summary));
    }
    Ok(())
}

fn describe_commit(summary: &CommitSummary) -> String {
    let noun = if summary.files == 1 { "file" } else { "files" };
    format!(
        "Committed {} {} as {} on {}",
        summary.files, noun, summary.commit_id, summary.branch
    )
}
