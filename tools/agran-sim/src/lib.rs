//! Host simulator for the AGRAN kernel.
//!
//! Boots the kernel against host stand-ins for its devices and drives the
//! shell from stdin or a script file.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod sim;
