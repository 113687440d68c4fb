//! AGRAN Kernel Library
//!
//! A small polling-driven kernel: a fixed process table with a cooperative
//! round-robin scheduler, a flat in-memory file store and a line-editing
//! shell on a text-mode screen.
//!
//! # Architecture
//!
//! ```text
//!   ScancodeSource ──> KeyboardDecoder ──> Shell ──> commands
//!                                            │          │
//!                                            │    Scheduler / FileTable
//!                                            ▼          │
//!                                         Console <─────┘
//! ```
//!
//! Nothing runs on interrupts. [`Kernel::poll`] services at most one
//! scancode per call, and every scheduling step is an explicit
//! [`scheduler::Scheduler::tick`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod console;
pub mod drivers;
pub mod error;
pub mod logger;
pub mod process;
pub mod scheduler;
pub mod terminal;
pub mod text;

#[cfg(test)]
mod tests;

use alloc::boxed::Box;

use config::KernelConfig;
use console::Console;
use drivers::keyboard::{Key, KeyboardDecoder, ScancodeSource};
use drivers::rtc::Clock;
use error::ConfigError;
use scheduler::Scheduler;
use terminal::fs::FileTable;
use terminal::{PowerAction, Shell};

/// The whole machine state: everything the polling loop touches.
pub struct Kernel {
    config: KernelConfig,
    scheduler: Scheduler,
    fs: FileTable,
    shell: Shell,
    keyboard: KeyboardDecoder,
    clock: Box<dyn Clock>,
}

impl Kernel {
    /// Build a kernel from a validated configuration.
    pub fn new(config: KernelConfig, clock: Box<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Kernel {
            scheduler: Scheduler::new(&config),
            fs: FileTable::new(config.max_files, config.max_filename_len, config.max_content_len),
            shell: Shell::new(&config),
            keyboard: KeyboardDecoder::new(),
            clock,
            config,
        })
    }

    /// Print the welcome banner and the first prompt.
    pub fn boot(&mut self, out: &mut dyn Console) {
        log::info!("kernel: boot");
        out.clear();
        self.shell.banner(out);
    }

    /// Service at most one pending scancode.
    pub fn poll(
        &mut self,
        source: &mut dyn ScancodeSource,
        out: &mut dyn Console,
    ) -> Option<PowerAction> {
        match self.keyboard.poll(source) {
            Some(key) => self.handle_key(key, out),
            None => {
                if self.config.tick_on_idle_poll {
                    self.scheduler.tick(out);
                }
                None
            }
        }
    }

    /// Feed an already decoded key to the shell.
    pub fn handle_key(&mut self, key: Key, out: &mut dyn Console) -> Option<PowerAction> {
        let action = self.shell.handle_key(
            key,
            &mut self.scheduler,
            &mut self.fs,
            self.clock.as_mut(),
            out,
        );
        if let Some(action) = action {
            log::info!("kernel: {:?} requested", action);
        }
        action
    }

    /// Type a whole line followed by Enter.
    pub fn submit_line(&mut self, line: &str, out: &mut dyn Console) -> Option<PowerAction> {
        for c in line.chars() {
            self.handle_key(Key::Char(c), out);
        }
        self.handle_key(Key::Enter, out)
    }

    /// Poll until a command asks to power off or reboot.
    pub fn run(&mut self, source: &mut dyn ScancodeSource, out: &mut dyn Console) -> PowerAction {
        loop {
            if let Some(action) = self.poll(source, out) {
                return action;
            }
            core::hint::spin_loop();
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn fs(&self) -> &FileTable {
        &self.fs
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }
}
