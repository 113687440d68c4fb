//! Terminal Subsystem
//!
//! Line-editing shell with a flat in-memory file store, command history,
//! an integer calculator and the process commands.

pub mod calc;
pub mod commands;
pub mod fs;
pub mod shell;

pub use commands::{CmdResult, PowerAction, ShellAction};
pub use shell::{Mode, Shell};
