//! Process Management
//!
//! The fixed-size process table and the read-only reports built from it.
//! Scheduling decisions live in [`crate::scheduler`].

pub mod report;
pub mod table;

pub use report::render_processes;
pub use table::{Pcb, Pid, ProcessInfo, ProcessState, ProcessTable};
