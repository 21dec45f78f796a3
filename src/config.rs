use crate::error::{Error, Result};
use crate::log_debug;

use dirs::home_dir;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Name used when the git config does not provide `user.name`
pub const DEFAULT_AUTHOR_NAME: &str = "Your Name";
/// Email used when the git config does not provide `user.email`
pub const DEFAULT_AUTHOR_EMAIL: &str = "your.email@example.com";

/// Default location of the git configuration file
pub const DEFAULT_GITCONFIG: &str = "~/.gitconfig";

const USER_SECTION: &str = "user";

/// Identity stamped on the initial commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
        }
    }
}

impl AuthorInfo {
    /// Load the author identity from a git configuration file.
    ///
    /// `path` may start with `~`, which is expanded to the home directory.
    /// Missing or empty `user.name` / `user.email` fall back to the defaults,
    /// but the file itself must exist and be readable.
    pub fn load(path: &str) -> Result<Self> {
        let config_path = expand_tilde(path)?;
        log_debug!("Reading git config from {}", config_path.display());

        let config = read_git_config(&config_path)?;

        let mut author = Self::default();
        if let Some(name) = lookup(&config, &config_path, "name")? {
            author.name = name;
        }
        if let Some(email) = lookup(&config, &config_path, "email")? {
            author.email = email;
        }

        log_debug!("Resolved author: {} <{}>", author.name, author.email);
        Ok(author)
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own and `~/...` are expanded; anything else, including
/// `~other/...`, is returned as-is.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };

    let home = home_dir().ok_or_else(|| Error::ConfigExpand {
        path: path.to_string(),
    })?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn read_git_config(path: &Path) -> Result<git2::Config> {
    // libgit2 happily opens a missing file as an empty config
    File::open(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = git2::Config::open(path).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    // A snapshot forces the file to be parsed now and gives stable reads
    config.snapshot().map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn lookup(config: &git2::Config, path: &Path, key: &str) -> Result<Option<String>> {
    let full_key = format!("{USER_SECTION}.{key}");
    match config.get_string(&full_key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(source) => Err(Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        }),
    }
}
