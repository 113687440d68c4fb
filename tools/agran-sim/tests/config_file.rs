//! Loading kernel configuration files from disk.

use std::io::Write;

use agran_kernel::config::{KernelConfig, QuantumPolicy};
use agran_sim::config;
use agran_sim::error::SimError;

#[test]
fn loads_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_processes = 2").unwrap();
    writeln!(file, "default_quantum = 3").unwrap();
    writeln!(file, "ready_queue_capacity = 1").unwrap();
    writeln!(file, "quantum_policy = \"clamped\"").unwrap();
    writeln!(file, "tick_on_idle_poll = true").unwrap();

    let config = config::load(Some(file.path())).unwrap();
    assert_eq!(config.max_processes, 2);
    assert_eq!(config.default_quantum, 3);
    assert_eq!(config.queue_capacity(), 1);
    assert_eq!(config.quantum_policy, QuantumPolicy::Clamped);
    assert!(config.tick_on_idle_poll);
    assert_eq!(config.max_files, KernelConfig::default().max_files);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, SimError::Read { .. }));
    assert_eq!(err.exit_code(), std::process::ExitCode::from(2));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_processes = \"many\"").unwrap();
    let err = config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, SimError::ConfigParse { .. }));
}

#[test]
fn configured_kernel_runs_a_script() {
    use agran_kernel::console::LineBuffer;
    use agran_kernel::drivers::rtc::FixedClock;
    use agran_sim::sim::{self, Outcome};

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_processes = 1").unwrap();
    let config = config::load(Some(file.path())).unwrap();

    let mut out = LineBuffer::new();
    let outcome = sim::run(
        config,
        Box::new(FixedClock::default()),
        &b"run a\nrun b\nreboot\n"[..],
        &mut out,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Power(agran_kernel::terminal::PowerAction::Reboot));
    assert!(out.contains("Error: Failed to create process 'b'"));
}
