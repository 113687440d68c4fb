//! Kernel log backend.
//!
//! The kernel logs through the `log` facade. This backend prefixes each
//! record with a fixed-width level tag and hands the formatted line to a
//! registered sink (the debug serial port on hardware, stderr in the host
//! simulator).

use core::fmt;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// Receives one formatted log line, without a trailing newline.
pub type LogSink = fn(fmt::Arguments<'_>);

static SINK: Mutex<Option<LogSink>> = Mutex::new(None);

static LOGGER: KernelLogger = KernelLogger;

struct KernelLogger;

/// Fixed-width tag printed before each record.
pub fn level_prefix(level: Level) -> &'static str {
    match level {
        Level::Trace => "[TRACE]",
        Level::Debug => "[DEBUG]",
        Level::Info => "[INFO ]",
        Level::Warn => "[WARN ]",
        Level::Error => "[ERROR]",
    }
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Copy the sink out so a sink that logs cannot deadlock.
        let sink = *SINK.lock();
        if let Some(sink) = sink {
            sink(format_args!(
                "{} {}: {}",
                level_prefix(record.level()),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

/// Install the kernel logger. Fails if a logger is already installed.
pub fn init(sink: LogSink, level: LevelFilter) -> Result<(), SetLoggerError> {
    *SINK.lock() = Some(sink);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Change the maximum level at runtime.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
