//! Process listing for the `ps` command.

use crate::console::Console;

use super::table::ProcessInfo;

const HEADER: &str = "=== Active Processes ===";
const FOOTER: &str = "=====================";

/// Render a snapshot in the order given (current process first).
pub fn render_processes(processes: &[ProcessInfo], out: &mut dyn Console) {
    out.emit_line(HEADER);
    for p in processes {
        crate::console_println!(
            out,
            "PID: {} Name: {} State: {} Time Remaining: {}",
            p.pid,
            p.name,
            p.state,
            p.work_remaining
        );
    }
    if processes.is_empty() {
        out.emit_line("No active processes.");
    }
    out.emit_line(FOOTER);
}
