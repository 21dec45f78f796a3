use crate::error::{Error, Result};

use clap::ValueEnum;
use std::io;
use std::sync::{Once, OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

/// Output format of log records
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

/// Maps the number of `-v` flags to a filter directive.
///
/// No flag logs at info; each `-v` raises the level by one step.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize logging to stderr in the requested format.
///
/// `RUST_LOG` takes precedence over the verbosity-derived level. Records
/// emitted through the `log` macros are forwarded into `tracing`. Only the
/// first call installs a subscriber; later calls return its result.
pub fn init(format: LogFormat, verbosity: u8) -> Result<()> {
    static INIT: Once = Once::new();
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

        let builder = fmt()
            .with_env_filter(env_filter)
            .with_target(verbosity > 0)
            .with_level(true)
            .with_timer(fmt::time::ChronoLocal::rfc_3339())
            .with_writer(io::stderr);

        let result = match format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        let _ = INIT_RESULT.set(result.map_err(|e| format!("{e}")));
    });

    match INIT_RESULT.get() {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(Error::LogSetup(e.clone())),
        None => Err(Error::LogSetup(
            "initialization failed unexpectedly".to_string(),
        )),
    }
}

// Logging macros used throughout the crate
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
