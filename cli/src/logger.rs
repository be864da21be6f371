//! Minimal stderr logger for `--verbose`.

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("panelstock")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "error".red().bold(),
            Level::Warn => "warn".yellow().bold(),
            Level::Info => "info".green(),
            Level::Debug => "debug".blue(),
            Level::Trace => "trace".dimmed(),
        };
        eprintln!("{} {}", level, record.args());
    }

    fn flush(&self) {}
}

/// Install the logger; `trace` also shows every emitted record.
pub fn init(trace: bool) {
    let level = if trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
