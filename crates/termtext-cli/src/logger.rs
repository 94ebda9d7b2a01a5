//! A minimal stderr logger for the `log` facade.
//!
//! The level follows `TERMTEXT_LOG` when it is set to a valid level name,
//! otherwise the flags: debug gives `Debug`, verbose gives `Info`, and the
//! default is `Warn`.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use termtext::Flags;

pub const LOG_ENV: &str = "TERMTEXT_LOG";

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stderr = std::io::stderr();
        let _ = writeln!(
            stderr.lock(),
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Picks the log level from an optional env value and the flags.
pub fn level_for(flags: Flags, env: Option<&str>) -> LevelFilter {
    if let Some(level) = env.and_then(|v| v.parse().ok()) {
        return level;
    }
    if flags.debug {
        LevelFilter::Debug
    } else if flags.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Installs the logger. Fails if a logger is already installed.
pub fn init(flags: Flags) -> Result<(), SetLoggerError> {
    let env = std::env::var(LOG_ENV).ok();
    let level = level_for(flags, env.as_deref());
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
