//! Console output capability.
//!
//! Everything the kernel prints goes through [`Console`]. The text-mode
//! screen implements it on the machine; [`LineBuffer`] collects output into
//! lines for command results and tests.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::drivers::vga::ColorCode;

/// A display surface the kernel can write human-readable text to.
pub trait Console {
    /// Write text at the cursor. `\n` ends the line.
    fn write_str(&mut self, text: &str);

    /// Write a line of text followed by a newline.
    fn emit_line(&mut self, text: &str) {
        self.write_str(text);
        self.write_str("\n");
    }

    /// Write a decimal integer.
    fn emit_int(&mut self, value: i64) {
        let _ = fmt::Write::write_fmt(&mut ConsoleWriter(self), format_args!("{}", value));
    }

    /// Erase the character before the cursor.
    fn backspace(&mut self) {
        self.write_str("\u{8} \u{8}");
    }

    /// Blank the surface and home the cursor.
    fn clear(&mut self) {}

    /// Change the attribute used for subsequent text.
    fn set_color(&mut self, _color: ColorCode) {}
}

/// `core::fmt::Write` adapter over a console.
pub struct ConsoleWriter<'a, C: Console + ?Sized>(pub &'a mut C);

impl<C: Console + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}

/// Formatted write to a console.
#[macro_export]
macro_rules! console_print {
    ($console:expr, $($arg:tt)*) => {{
        let _ = ::core::fmt::Write::write_fmt(
            &mut $crate::console::ConsoleWriter($console),
            format_args!($($arg)*),
        );
    }};
}

/// Formatted line to a console.
#[macro_export]
macro_rules! console_println {
    ($console:expr) => ($crate::console::Console::write_str($console, "\n"));
    ($console:expr, $($arg:tt)*) => {{
        $crate::console_print!($console, $($arg)*);
        $crate::console::Console::write_str($console, "\n");
    }};
}

/// Console that splits output into complete lines.
///
/// Backspace sequences edit the pending line; `clear` drops everything.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    pending: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed lines so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Text written after the last newline.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Take all output, flushing a non-empty pending line.
    pub fn into_lines(mut self) -> Vec<String> {
        if !self.pending.is_empty() {
            self.lines.push(core::mem::take(&mut self.pending));
        }
        self.lines
    }

    /// Whether any completed line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle)) || self.pending.contains(needle)
    }
}

impl Console for LineBuffer {
    fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\n' => self.lines.push(core::mem::take(&mut self.pending)),
                '\u{8}' => {
                    self.pending.pop();
                }
                '\r' => self.pending.clear(),
                c => self.pending.push(c),
            }
        }
    }

    fn backspace(&mut self) {
        self.pending.pop();
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_line_and_int() {
        let mut out = LineBuffer::new();
        out.write_str("PID: ");
        out.emit_int(-42);
        out.write_str("\n");
        out.emit_line("done");
        assert_eq!(out.lines(), ["PID: -42", "done"]);
        assert_eq!(out.pending(), "");
    }

    #[test]
    fn test_backspace_edits_pending_line() {
        let mut out = LineBuffer::new();
        out.write_str("lsx");
        out.backspace();
        assert_eq!(out.pending(), "ls");
        out.write_str("a\u{8} \u{8}");
        assert_eq!(out.pending(), "ls");
    }

    #[test]
    fn test_macros_format_into_console() {
        let mut out = LineBuffer::new();
        crate::console_println!(&mut out, "{} + {} = {}", 2, 3, 5);
        crate::console_print!(&mut out, "tail");
        assert_eq!(out.lines(), ["2 + 3 = 5"]);
        assert_eq!(out.into_lines(), ["2 + 3 = 5", "tail"]);
    }
}
