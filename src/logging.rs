#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Level named by `value`, or `fallback` if it does not parse.
pub fn parse_level(value: Option<&str>, fallback: LevelFilter) -> LevelFilter {
    value.and_then(|lvl| lvl.parse().ok()).unwrap_or(fallback)
}

/// Initialize logging with a level taken from the `FLEETFIRE_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid.
pub fn init_logging() {
    let level = parse_level(env::var("FLEETFIRE_LOG").ok().as_deref(), LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
