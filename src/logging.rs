//! This module defines how logging messages are printed.
//!
//! Messages go to stderr so that report output on stdout or in a file
//! stays clean.
//!
//! # Example
//!
//! ```
//! nbsim::logging::init(log::LevelFilter::Info).ok();
//! log::info!("Hello, world!");
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;
static START: OnceLock<Instant> = OnceLock::new();

pub struct StderrLogger;

/// Format a logging message.
///
/// Info lines carry only the message; other levels also carry `file:line`.
pub fn format_msg(record: &Record) -> String {
    let msec = START.get_or_init(Instant::now).elapsed().as_millis();
    let head = format!("[{:>10} {:<5}] ", msec, record.level().as_str());

    match record.level() {
        Level::Info => format!("{head}{}", record.args()),
        _ => {
            if let (Some(file), Some(line)) = (record.file(), record.line()) {
                format!("{head}{file}:{line}: {}", record.args())
            } else {
                format!("{head}{}", record.args())
            }
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let msg = format_msg(record);
        let stderr = std::io::stderr();
        let mut lock = stderr.lock();
        let _ = writeln!(lock, "{msg}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger with the given maximum level.
///
/// Fails if a logger has already been installed in this process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    START.get_or_init(Instant::now);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Map a `-v` repetition count onto a level, starting from `Info`.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
