use std::io::Write;
use std::sync::{Mutex, OnceLock};

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger writing colored records to stderr.
pub struct StaticLogger(Mutex<std::io::Stderr>);

impl Log for StaticLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mark = match record.level() {
            Level::Trace => "{TRACE}".bright_black(),
            Level::Debug => "{DEBUG}".bright_black(),
            Level::Info => "{INFO}".cyan(),
            Level::Warn => "{WARN}".yellow(),
            Level::Error => "{ERROR}".red(),
        }
        .bold();
        let target = record.target();
        self.0.clear_poison();
        if let Ok(mut stderr) = self.0.lock() {
            let _ = writeln!(stderr, "{mark:<8} {target:<32} {}", record.args());
        }
    }

    fn flush(&self) {
        self.0.clear_poison();
        if let Ok(mut stderr) = self.0.lock() {
            let _ = stderr.flush();
        }
    }
}

/// Installs the [`StaticLogger`] with the given maximum level.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<StaticLogger> = OnceLock::new();
    log::set_logger(LOGGER.get_or_init(|| StaticLogger(Mutex::new(std::io::stderr()))))
        .map(|()| log::set_max_level(level))
}
