//! Kernel configuration.
//!
//! Compile-time defaults live here as constants; [`KernelConfig`] carries
//! the values a particular boot runs with. Every field has a default so a
//! partial configuration file is enough.

use serde::Deserialize;

use crate::error::ConfigError;

/// Number of slots in the process table.
pub const MAX_PROCESSES: usize = 32;

/// Time units a process may run before it is put back on the ready queue.
pub const DEFAULT_QUANTUM: i32 = 5;

/// Longest process name, in bytes.
pub const MAX_PROCESS_NAME: usize = 31;

/// Number of slots in the flat file table.
pub const MAX_FILES: usize = 32;

/// Longest file name, in bytes.
pub const MAX_FILENAME: usize = 31;

/// Largest file body, in bytes.
pub const MAX_CONTENT: usize = 511;

/// Shell history ring size.
pub const HISTORY_SIZE: usize = 64;

/// Line editor capacity, in bytes.
pub const MAX_COMMAND_LENGTH: usize = 255;

/// Most tokens a command line is split into.
pub const MAX_ARGS: usize = 16;

/// How a new process's first quantum is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantumPolicy {
    /// `min(work_units, default_quantum)`.
    #[default]
    Clamped,
    /// The requested work units are used as the first quantum.
    Verbatim,
}

/// Boot-time configuration of the kernel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    pub max_processes: usize,
    pub default_quantum: i32,
    /// Defaults to `max_processes` when absent.
    pub ready_queue_capacity: Option<usize>,
    pub quantum_policy: QuantumPolicy,
    /// Run one scheduling step on every `create`/`kill`.
    pub step_on_mutation: bool,
    pub max_name_len: usize,
    pub max_files: usize,
    pub max_filename_len: usize,
    pub max_content_len: usize,
    pub history_size: usize,
    pub max_command_len: usize,
    pub max_args: usize,
    /// Run one scheduling step on every poll that produced no key.
    pub tick_on_idle_poll: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_processes: MAX_PROCESSES,
            default_quantum: DEFAULT_QUANTUM,
            ready_queue_capacity: None,
            quantum_policy: QuantumPolicy::Clamped,
            step_on_mutation: true,
            max_name_len: MAX_PROCESS_NAME,
            max_files: MAX_FILES,
            max_filename_len: MAX_FILENAME,
            max_content_len: MAX_CONTENT,
            history_size: HISTORY_SIZE,
            max_command_len: MAX_COMMAND_LENGTH,
            max_args: MAX_ARGS,
            tick_on_idle_poll: false,
        }
    }
}

impl KernelConfig {
    /// Ready queue capacity after applying the default.
    pub fn queue_capacity(&self) -> usize {
        self.ready_queue_capacity.unwrap_or(self.max_processes)
    }

    /// Reject configurations the kernel cannot boot with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("max_processes", self.max_processes),
            ("ready_queue_capacity", self.queue_capacity()),
            ("max_name_len", self.max_name_len),
            ("max_files", self.max_files),
            ("max_filename_len", self.max_filename_len),
            ("max_content_len", self.max_content_len),
            ("history_size", self.history_size),
            ("max_command_len", self.max_command_len),
            ("max_args", self.max_args),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::ZeroSize { field });
            }
        }
        if self.default_quantum <= 0 {
            return Err(ConfigError::NonPositiveQuantum(self.default_quantum));
        }
        Ok(())
    }
}
