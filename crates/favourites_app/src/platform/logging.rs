//! Log sinks for the console host.
//!
//! The list is drawn on stdout, so by default logs only go to
//! `./favourites.log` in the working directory.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_PATH: &str = "./favourites.log";

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

impl LogDestination {
    fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn writes_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Installs the global logger. A log file that cannot be created falls back
/// to the terminal so records are never silently dropped.
pub fn initialize(destination: LogDestination) {
    let loggers = sinks(destination, Path::new(LOG_PATH), LevelFilter::Info);
    let _ = CombinedLogger::init(loggers);
}

fn sinks(
    destination: LogDestination,
    path: &Path,
    level: LevelFilter,
) -> Vec<Box<dyn SharedLogger>> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut want_terminal = destination.writes_terminal();
    if destination.writes_file() {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config.clone(), file)),
            Err(err) => {
                eprintln!(
                    "Cannot write log file {}: {err}; logging to terminal",
                    path.display()
                );
                want_terminal = true;
            }
        }
    }
    if want_terminal {
        loggers.push(terminal(level, config));
    }
    loggers
}

fn terminal(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
