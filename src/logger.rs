//! `log` backend for the binary: plain lines on stderr, nested by level.

use log::{Level, LevelFilter, Metadata, Record};
use static_assertions::assert_impl_all;

assert_impl_all!(log::SetLoggerError: std::error::Error, Send, Sync);

static LOGGER: Logger = Logger;

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", line(record.level(), &record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn depth(level: Level) -> usize {
    match level {
        Level::Error | Level::Warn | Level::Info => 0,
        Level::Debug => 1,
        Level::Trace => 2,
    }
}

fn line(level: Level, msg: &str) -> String {
    format!("{}{level:<5} {msg}", "  ".repeat(depth(level)))
}

/// Map a `-v` count to a filter: warn, info, debug, then trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Fails if another logger is already set.
pub fn init(verbosity: u8) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for(verbosity));
    Ok(())
}
