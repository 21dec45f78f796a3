use clap::Parser;
use greenleeks::cli::{self, Options};
use greenleeks::{Error, log_error};
use std::process::ExitCode;

fn main() -> ExitCode {
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported through the same path
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli::main(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let logging_failed = e
                .downcast_ref::<Error>()
                .is_some_and(|err| matches!(err, Error::LogSetup(_)));
            if logging_failed {
                eprintln!("Error: {e:#}");
            } else {
                log_error!("run failed: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
