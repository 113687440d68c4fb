//! Shell Engine
//!
//! Line editor and command loop. Keys arrive one at a time from the polling
//! loop; printable keys are echoed into a bounded input buffer, Enter runs
//! the line, and Up/Down walk the command history.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use super::commands::{self, Context, PowerAction, ShellAction};
use super::fs::FileTable;
use crate::config::KernelConfig;
use crate::console::Console;
use crate::drivers::keyboard::Key;
use crate::drivers::rtc::Clock;
use crate::scheduler::Scheduler;
use crate::text;

pub const PROMPT: &str = "$ ";
pub const CALCULATOR_PROMPT: &str = "> ";

// ────────────────────────── History ──────────────────────────

/// Ring of the most recent command lines, oldest first.
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a line, evicting the oldest once full. Blank lines are skipped.
    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() || self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(String::from(line));
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

// ────────────────────────── Shell State ──────────────────────────

/// What Enter does with the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Each line is a calculator expression until `exit`.
    Calculator,
}

pub struct Shell {
    buffer: String,
    history: History,
    /// History index shown in the buffer while navigating with Up/Down.
    browsing: Option<usize>,
    mode: Mode,
    max_command_len: usize,
    max_args: usize,
}

impl Shell {
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            buffer: String::with_capacity(config.max_command_len),
            history: History::new(config.history_size),
            browsing: None,
            mode: Mode::Normal,
            max_command_len: config.max_command_len,
            max_args: config.max_args,
        }
    }

    /// Welcome text followed by the first prompt.
    pub fn banner(&self, out: &mut dyn Console) {
        out.emit_line("Welcome to AGRAN OS v0.1");
        out.emit_line("Type 'help' for a list of commands");
        out.emit_line("");
        self.prompt(out);
    }

    pub fn prompt(&self, out: &mut dyn Console) {
        out.write_str(match self.mode {
            Mode::Normal => PROMPT,
            Mode::Calculator => CALCULATOR_PROMPT,
        });
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Process one key. Returns a power action when a command asked for one;
    /// no prompt is printed in that case.
    pub fn handle_key(
        &mut self,
        key: Key,
        scheduler: &mut Scheduler,
        fs: &mut FileTable,
        clock: &mut dyn Clock,
        out: &mut dyn Console,
    ) -> Option<PowerAction> {
        match key {
            Key::Char(c) => {
                if self.buffer.len() + c.len_utf8() <= self.max_command_len {
                    self.buffer.push(c);
                    let mut utf8 = [0u8; 4];
                    out.write_str(c.encode_utf8(&mut utf8));
                }
                None
            }
            Key::Backspace => {
                if self.buffer.pop().is_some() {
                    out.backspace();
                }
                None
            }
            Key::Up => {
                self.history_up(out);
                None
            }
            Key::Down => {
                self.history_down(out);
                None
            }
            Key::Enter => {
                out.write_str("\n");
                let line = core::mem::take(&mut self.buffer);
                self.browsing = None;

                let power = match self.mode {
                    Mode::Normal => {
                        let mut ctx = Context {
                            scheduler,
                            fs,
                            clock,
                            history: &self.history,
                        };
                        let result = run_line(&line, self.max_args, &mut ctx);
                        // Recorded after running, so `history` does not list itself.
                        self.history.push(&line);
                        result.and_then(|r| self.apply(r, out))
                    }
                    Mode::Calculator => {
                        if line.trim() == "exit" {
                            out.emit_line("Exiting calculator.");
                            self.mode = Mode::Normal;
                        } else {
                            for l in commands::calculate(&line).output {
                                out.emit_line(&l);
                            }
                        }
                        None
                    }
                };

                if power.is_none() {
                    self.prompt(out);
                }
                power
            }
        }
    }

    /// Carry out a command's action and print its output.
    fn apply(&mut self, result: commands::CmdResult, out: &mut dyn Console) -> Option<PowerAction> {
        let mut power = None;
        match result.action {
            Some(ShellAction::Clear) => out.clear(),
            Some(ShellAction::SetColor(color)) => out.set_color(color),
            Some(ShellAction::EnterCalculator) => self.mode = Mode::Calculator,
            Some(ShellAction::Power(action)) => power = Some(action),
            None => {}
        }
        for line in &result.output {
            out.emit_line(line);
        }
        power
    }

    fn history_up(&mut self, out: &mut dyn Console) {
        if self.mode != Mode::Normal || self.history.is_empty() {
            return;
        }
        let index = match self.browsing {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.browsing = Some(index);
        let entry = String::from(self.history.get(index).unwrap_or_default());
        self.replace_line(&entry, out);
    }

    fn history_down(&mut self, out: &mut dyn Console) {
        let Some(i) = self.browsing else {
            return;
        };
        if i + 1 < self.history.len() {
            self.browsing = Some(i + 1);
            let entry = String::from(self.history.get(i + 1).unwrap_or_default());
            self.replace_line(&entry, out);
        } else {
            self.browsing = None;
            self.replace_line("", out);
        }
    }

    /// Erase the edited line on screen and show `line` in its place.
    fn replace_line(&mut self, line: &str, out: &mut dyn Console) {
        for _ in self.buffer.chars() {
            out.backspace();
        }
        self.buffer.clear();
        self.buffer.push_str(text::truncate(line, self.max_command_len));
        out.write_str(&self.buffer);
    }
}

// ────────────────────────── Parser ──────────────────────────

/// Split a command line on spaces into at most `max_args` words.
pub fn parse(line: &str, max_args: usize) -> Vec<&str> {
    line.split(' ')
        .filter(|w| !w.is_empty())
        .take(max_args)
        .collect()
}

/// Parse and run one line. `None` for a blank line.
fn run_line(line: &str, max_args: usize, ctx: &mut Context<'_>) -> Option<commands::CmdResult> {
    let argv = parse(line, max_args);
    let (name, args) = argv.split_first()?;
    Some(commands::execute_command(name, args, ctx))
}
