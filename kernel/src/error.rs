//! Kernel Error Types
//!
//! One error enum per subsystem. None of them is fatal: every failure is
//! reported to the operator and the polling loop carries on.

use core::fmt;

/// Process table and scheduler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// Every process slot is occupied.
    TableFull,
    /// The pid is out of range, stale, or names a terminated process.
    InvalidHandle,
    /// The ready queue refused the new process.
    AdmissionFailure,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::TableFull => write!(f, "no free process slot"),
            ProcessError::InvalidHandle => write!(f, "no such process"),
            ProcessError::AdmissionFailure => write!(f, "ready queue is full"),
        }
    }
}

/// Returned by a push onto a full ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ready queue is full")
    }
}

impl From<QueueFull> for ProcessError {
    fn from(_: QueueFull) -> Self {
        ProcessError::AdmissionFailure
    }
}

/// Flat file table errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Every file slot is in use.
    NoFreeSlots,
    /// A file with this name already exists.
    AlreadyExists,
    /// No file with this name exists.
    NotFound,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NoFreeSlots => write!(f, "No free file slots"),
            FsError::AlreadyExists => write!(f, "File already exists"),
            FsError::NotFound => write!(f, "File not found"),
        }
    }
}

/// Calculator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    /// Right-hand operand of `/` was zero.
    DivisionByZero,
    /// The input was not of the form `a op b`.
    InvalidExpression,
    /// The result does not fit in an `i32`.
    Overflow,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::DivisionByZero => write!(f, "Error: Division by zero!"),
            CalcError::InvalidExpression => {
                write!(f, "Invalid expression. Use format: 2+3 or 10 - 4")
            }
            CalcError::Overflow => write!(f, "Error: Result out of range"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A table or buffer size was zero.
    ZeroSize { field: &'static str },
    /// The default quantum must be at least one unit.
    NonPositiveQuantum(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSize { field } => write!(f, "{} must be greater than zero", field),
            ConfigError::NonPositiveQuantum(q) => {
                write!(f, "default_quantum must be positive, got {}", q)
            }
        }
    }
}
