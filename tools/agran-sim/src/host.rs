//! Host stand-ins for the kernel's devices: a terminal console, the local
//! wall clock and a stderr log sink.

use std::fmt;
use std::io::{self, Write};

use agran_kernel::console::Console;
use agran_kernel::drivers::rtc::{Clock, RtcTime};
use chrono::{Datelike, Local, Timelike};

/// Console that streams plain text to a writer.
///
/// Write errors are kept and reported once the run ends.
pub struct StreamConsole<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> StreamConsole<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Console for StreamConsole<W> {
    fn write_str(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.inner.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }
}

/// The host's local time.
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&mut self) -> RtcTime {
        let now = Local::now();
        RtcTime {
            second: now.second() as u8,
            minute: now.minute() as u8,
            hour: now.hour() as u8,
            day: now.day() as u8,
            month: now.month() as u8,
            year: u16::try_from(now.year()).unwrap_or(2000),
        }
    }
}

/// Log sink: one timestamped line per record on stderr.
pub fn stderr_sink(args: fmt::Arguments<'_>) {
    eprintln!("{} {}", Local::now().format("%H:%M:%S%.3f"), args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_console_passes_text_through() {
        let mut console = StreamConsole::new(Vec::new());
        console.emit_line("$ ps");
        console.emit_int(-7);
        let bytes = console.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "$ ps\n-7");
    }

    #[test]
    fn local_clock_is_plausible() {
        let now = LocalClock.now();
        assert!((1..=12).contains(&now.month));
        assert!((1..=31).contains(&now.day));
        assert!(now.hour < 24 && now.minute < 60);
    }
}
