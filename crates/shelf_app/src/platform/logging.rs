//! Logger setup for the shelf binary.
//!
//! Log lines go to a file by default so they do not interleave with the
//! status output; `--verbose` mirrors them to the terminal at debug level.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub enum LogDestination {
    /// Write to the configured log file only.
    File,
    /// Write to the log file and the terminal.
    Both,
}

pub fn initialize(destination: LogDestination, log_path: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let file_level = match destination {
        LogDestination::File => LevelFilter::Info,
        LogDestination::Both => {
            loggers.push(TermLogger::new(
                LevelFilter::Debug,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ));
            LevelFilter::Debug
        }
    };
    if let Some(file_logger) = create_file_logger(file_level, config, log_path) {
        loggers.push(file_logger);
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
