//! VGA Text Mode Screen
//!
//! An 80x25 character grid with one attribute byte per cell, laid out like
//! the VGA text buffer. Output wraps at the right edge and scrolls up when
//! the cursor falls off the bottom row.

use alloc::string::String;

use crate::console::Console;

pub const BUFFER_WIDTH: usize = 80;
pub const BUFFER_HEIGHT: usize = 25;

/// The 16 VGA text colours.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0x0,
    Blue = 0x1,
    Green = 0x2,
    Cyan = 0x3,
    Red = 0x4,
    Magenta = 0x5,
    Brown = 0x6,
    LightGray = 0x7,
    DarkGray = 0x8,
    LightBlue = 0x9,
    LightGreen = 0xA,
    LightCyan = 0xB,
    LightRed = 0xC,
    Pink = 0xD,
    Yellow = 0xE,
    White = 0xF,
}

/// Attribute byte: background in the high nibble, foreground in the low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    pub const fn from_raw(attr: u8) -> ColorCode {
        ColorCode(attr)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for ColorCode {
    /// Light grey on black (`0x07`).
    fn default() -> Self {
        ColorCode::new(Color::LightGray, Color::Black)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii: u8,
    pub color: ColorCode,
}

impl ScreenChar {
    const fn blank(color: ColorCode) -> Self {
        ScreenChar { ascii: b' ', color }
    }
}

/// Text-mode screen state.
pub struct Screen {
    buffer: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
    column: usize,
    row: usize,
    color: ColorCode,
}

impl Screen {
    pub fn new() -> Self {
        let color = ColorCode::default();
        Screen {
            buffer: [[ScreenChar::blank(color); BUFFER_WIDTH]; BUFFER_HEIGHT],
            column: 0,
            row: 0,
            color,
        }
    }

    /// (column, row) of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    pub fn color(&self) -> ColorCode {
        self.color
    }

    pub fn char_at(&self, column: usize, row: usize) -> Option<ScreenChar> {
        self.buffer.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Text of one row with trailing blanks removed.
    pub fn row_text(&self, row: usize) -> String {
        let mut s: String = self
            .buffer
            .get(row)
            .map(|r| r.iter().map(|c| c.ascii as char).collect())
            .unwrap_or_default();
        s.truncate(s.trim_end().len());
        s
    }

    /// The whole screen, one line per row, trailing blank rows dropped.
    pub fn dump(&self) -> String {
        let rows: alloc::vec::Vec<String> = (0..BUFFER_HEIGHT).map(|r| self.row_text(r)).collect();
        let used = rows.iter().rposition(|r| !r.is_empty()).map_or(0, |i| i + 1);
        rows[..used].join("\n")
    }

    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            b'\r' => self.column = 0,
            0x08 => {
                if self.column > 0 {
                    self.column -= 1;
                }
            }
            byte => {
                if self.column >= BUFFER_WIDTH {
                    self.new_line();
                }
                self.buffer[self.row][self.column] = ScreenChar {
                    ascii: byte,
                    color: self.color,
                };
                self.column += 1;
            }
        }
    }

    fn new_line(&mut self) {
        self.column = 0;
        if self.row + 1 < BUFFER_HEIGHT {
            self.row += 1;
            return;
        }
        self.buffer.copy_within(1.., 0);
        self.clear_row(BUFFER_HEIGHT - 1);
    }

    fn clear_row(&mut self, row: usize) {
        self.buffer[row] = [ScreenChar::blank(self.color); BUFFER_WIDTH];
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Screen {
    fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            // Code page 437 only covers ASCII here; anything else is a block.
            let byte = if c.is_ascii() { c as u8 } else { 0xFE };
            self.write_byte(byte);
        }
    }

    fn clear(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.column = 0;
        self.row = 0;
    }

    fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let mut screen = Screen::new();
        screen.emit_line("$ ps");
        screen.write_str("ok");
        assert_eq!(screen.row_text(0), "$ ps");
        assert_eq!(screen.row_text(1), "ok");
        assert_eq!(screen.cursor(), (2, 1));
    }

    #[test]
    fn test_backspace_erases() {
        let mut screen = Screen::new();
        screen.write_str("lsx");
        screen.backspace();
        assert_eq!(screen.row_text(0), "ls");
        assert_eq!(screen.cursor(), (2, 0));
    }

    #[test]
    fn test_wraps_long_lines() {
        let mut screen = Screen::new();
        let line: String = core::iter::repeat('x').take(BUFFER_WIDTH + 3).collect();
        screen.write_str(&line);
        assert_eq!(screen.row_text(1), "xxx");
    }

    #[test]
    fn test_scrolls_at_bottom() {
        let mut screen = Screen::new();
        for i in 0..BUFFER_HEIGHT + 2 {
            crate::console_println!(&mut screen, "line {}", i);
        }
        assert_eq!(screen.row_text(0), "line 3");
        assert_eq!(screen.row_text(BUFFER_HEIGHT - 2), "line 26");
        assert_eq!(screen.row_text(BUFFER_HEIGHT - 1), "");
        assert_eq!(screen.cursor(), (0, BUFFER_HEIGHT - 1));
    }

    #[test]
    fn test_color_applies_to_new_text() {
        let mut screen = Screen::new();
        screen.write_str("a");
        screen.set_color(ColorCode::new(Color::Red, Color::Black));
        screen.write_str("b");
        assert_eq!(screen.char_at(0, 0).unwrap().color.raw(), 0x07);
        assert_eq!(screen.char_at(1, 0).unwrap().color.raw(), 0x04);
    }

    #[test]
    fn test_clear_and_dump() {
        let mut screen = Screen::new();
        screen.emit_line("one");
        screen.emit_line("two");
        assert_eq!(screen.dump(), "one\ntwo");
        screen.clear();
        assert_eq!(screen.dump(), "");
        assert_eq!(screen.cursor(), (0, 0));
    }
}
