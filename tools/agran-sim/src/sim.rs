//! The simulated polling loop: command lines go in as keystrokes, console
//! output comes back out.

use std::io::BufRead;

use agran_kernel::config::KernelConfig;
use agran_kernel::console::Console;
use agran_kernel::drivers::rtc::Clock;
use agran_kernel::terminal::PowerAction;
use agran_kernel::Kernel;

use crate::error::SimError;

/// How a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A command asked to power off or reboot.
    Power(PowerAction),
    /// The input ran out.
    EndOfInput,
}

/// Boot a kernel and feed it every line of `input`.
pub fn run(
    config: KernelConfig,
    clock: Box<dyn Clock>,
    input: impl BufRead,
    console: &mut dyn Console,
) -> Result<Outcome, SimError> {
    let mut kernel = Kernel::new(config, clock)?;
    kernel.boot(console);

    for line in input.lines() {
        let line = line?;
        // Tolerate CRLF scripts.
        let line = line.trim_end_matches('\r');
        if let Some(action) = kernel.submit_line(line, console) {
            log::info!("simulation ended by {:?}", action);
            return Ok(Outcome::Power(action));
        }
    }
    log::info!("end of input after {} scheduler ticks", kernel.scheduler().ticks());
    Ok(Outcome::EndOfInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agran_kernel::console::LineBuffer;
    use agran_kernel::drivers::rtc::FixedClock;

    fn simulate(script: &str) -> (Outcome, LineBuffer) {
        let mut out = LineBuffer::new();
        let outcome = run(
            KernelConfig::default(),
            Box::new(FixedClock::default()),
            script.as_bytes(),
            &mut out,
        )
        .unwrap();
        (outcome, out)
    }

    #[test]
    fn script_runs_until_shutdown() {
        let (outcome, out) = simulate("run a\nshutdown\nps\n");
        assert_eq!(outcome, Outcome::Power(PowerAction::Shutdown));
        assert!(out.contains("Created process 'a' with PID 0"));
        // Nothing after shutdown runs.
        assert!(!out.contains("=== Active Processes ==="));
    }

    #[test]
    fn end_of_input() {
        let (outcome, out) = simulate("version\r\n");
        assert_eq!(outcome, Outcome::EndOfInput);
        assert!(out.lines().iter().any(|l| l == "AGRAN OS version 1.0"));
    }

    #[test]
    fn bad_config_fails_before_boot() {
        let config = KernelConfig {
            default_quantum: 0,
            ..KernelConfig::default()
        };
        let mut out = LineBuffer::new();
        let err = run(config, Box::new(FixedClock::default()), &b""[..], &mut out).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        assert!(out.lines().is_empty());
    }
}
