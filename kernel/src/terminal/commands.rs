//! Shell Command Implementations
//!
//! Commands organized by category: system, filesystem, process, math and
//! date/time. Each returns its output as lines; anything that must reach
//! beyond the output (clearing the screen, changing colour, powering off)
//! travels back as a [`ShellAction`].

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::calc;
use super::fs::FileTable;
use super::shell::History;
use crate::console::{Console, LineBuffer};
use crate::drivers::rtc::Clock;
use crate::drivers::vga::{Color, ColorCode};
use crate::error::{FsError, ProcessError};
use crate::process::render_processes;
use crate::scheduler::Scheduler;

// ────────────────────────── Result type ──────────────────────────

/// What the machine should do after `shutdown` or `reboot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Shutdown,
    Reboot,
}

/// Side effect requested by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Clear,
    SetColor(ColorCode),
    EnterCalculator,
    Power(PowerAction),
}

pub struct CmdResult {
    pub output: Vec<String>,
    pub success: bool,
    pub action: Option<ShellAction>,
}

impl CmdResult {
    pub fn ok(output: Vec<String>) -> Self { Self { output, success: true, action: None } }
    pub fn ok_one(line: String) -> Self { Self::ok(vec![line]) }
    pub fn ok_empty() -> Self { Self::ok(Vec::new()) }
    pub fn err(msg: String) -> Self { Self { output: vec![msg], success: false, action: None } }

    pub fn with_action(mut self, action: ShellAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Everything a command may touch.
pub struct Context<'a> {
    pub scheduler: &'a mut Scheduler,
    pub fs: &'a mut FileTable,
    pub clock: &'a mut dyn Clock,
    pub history: &'a History,
}

// ────────────────────────── Command registry ──────────────────────────

/// All available command names (sorted).
pub static COMMAND_LIST: &[&str] = &[
    "calculator", "clear", "create", "date", "delete", "demo", "echo",
    "filedemo", "font", "help", "history", "info", "kill", "ls", "ps",
    "read", "reboot", "run", "search", "shutdown", "time", "version", "write",
];

/// Dispatch a command. `args` excludes the command name.
pub fn execute_command(name: &str, args: &[&str], ctx: &mut Context<'_>) -> CmdResult {
    log::debug!("shell: {} {:?}", name, args);
    match name {
        // ── System ──
        "help"       => cmd_help(args),
        "clear"      => CmdResult::ok_empty().with_action(ShellAction::Clear),
        "echo"       => cmd_echo(args),
        "info"       => cmd_info(),
        "version"    => CmdResult::ok_one(String::from("AGRAN OS version 1.0")),
        "shutdown"   => cmd_shutdown(),
        "reboot"     => cmd_reboot(),
        "font"       => cmd_font(args),
        "history"    => cmd_history(ctx.history),

        // ── Filesystem ──
        "ls"         => cmd_ls(ctx.fs),
        "create"     => cmd_create(args, ctx.fs),
        "write"      => cmd_write(args, ctx.fs),
        "read"       => cmd_read(args, ctx.fs),
        "delete"     => cmd_delete(args, ctx.fs),
        "search"     => cmd_search(args, ctx.fs),
        "filedemo"   => cmd_filedemo(ctx.fs),

        // ── Process ──
        "ps"         => cmd_ps(ctx.scheduler),
        "run"        => cmd_run(args, ctx.scheduler),
        "kill"       => cmd_kill(args, ctx.scheduler),
        "demo"       => cmd_demo(ctx.scheduler),

        // ── Math ──
        "calculator" => cmd_calculator(args),

        // ── Date/time ──
        "date"       => CmdResult::ok_one(format!("Date: {}", ctx.clock.now().date())),
        "time"       => CmdResult::ok_one(format!("Time: {}", ctx.clock.now().time())),

        _ => CmdResult {
            output: vec![
                format!("Unknown command: {}", name),
                String::from("Type 'help' for available commands"),
            ],
            success: false,
            action: None,
        },
    }
}

fn usage(text: &str) -> CmdResult {
    CmdResult::err(format!("Usage: {}", text))
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|l| String::from(*l)).collect()
}

// ════════════════════════════════════════════════════════════
// System
// ════════════════════════════════════════════════════════════

fn cmd_help(args: &[&str]) -> CmdResult {
    let text: &[&str] = match args.first().copied() {
        None => &[
            "",
            "=== Help Categories ===",
            "",
            "filesystem  - File management commands",
            "process     - Process management commands",
            "system      - System commands",
            "math        - Calculator and math commands",
            "date/time   - Date, time, and clock commands",
            "history     - Show command history",
            "Type 'help <category>' to see commands in that category.",
        ],
        Some("filesystem") => &[
            "",
            "File System Commands:",
            "ls        - List all files in system",
            "create    - Create a new file (create filename)",
            "write     - Write text to file (write filename text)",
            "read      - Read file contents (read filename)",
            "delete    - Delete a file (delete filename)",
            "search    - Search for a file by name (search filename)",
            "filedemo  - Run file system demo",
        ],
        Some("process") => &[
            "",
            "Process Management Commands:",
            "ps        - Show all running processes",
            "run       - Start a new process (run processname [work])",
            "kill      - Stop a process (kill pid)",
            "demo      - Run process scheduling demo",
        ],
        Some("system") => &[
            "",
            "System Commands:",
            "clear     - Clear screen",
            "echo      - Echo the arguments",
            "info      - Show system information",
            "version   - Show OS version",
            "shutdown  - Shutdown the system",
            "reboot    - Reboot the system",
            "font      - Change text color (font red/green/yellow/blue/magenta/cyan/white)",
            "            Supported colors: red, green, yellow, blue, magenta, cyan, white",
        ],
        Some("math") => &[
            "",
            "Math/Calculator Commands:",
            "calculator - Enter calculator mode (type expressions like 2+3, type 'exit' to quit)",
        ],
        Some("date") | Some("time") | Some("date/time") => &[
            "",
            "Date/Time Commands:",
            "date       - Show current date",
            "time       - Show current time",
        ],
        Some("history") => &["", "history   - Show command history"],
        Some(_) => {
            return CmdResult::err(String::from(
                "Unknown help category. Type 'help' to see available categories.",
            ))
        }
    };
    CmdResult::ok(lines(text))
}

fn cmd_echo(args: &[&str]) -> CmdResult {
    if args.is_empty() {
        return usage("echo [text]");
    }
    CmdResult::ok_one(args.join(" "))
}

fn cmd_info() -> CmdResult {
    CmdResult::ok(lines(&[
        "",
        "AGRAN OS System Information",
        "==========================",
        "OS Name: AGRAN OS",
        "Version: 1.0",
        "Architecture: x86",
        "Memory: 1.44 MB",
        "Features:",
        "- Basic File System",
        "- Process Management",
        "- Round Robin Scheduling",
        "==========================",
    ]))
}

fn cmd_shutdown() -> CmdResult {
    CmdResult::ok(lines(&[
        "",
        "Shutting down AGRAN OS...",
        "It is now safe to turn off your computer.",
    ]))
    .with_action(ShellAction::Power(PowerAction::Shutdown))
}

fn cmd_reboot() -> CmdResult {
    CmdResult::ok(lines(&["", "Rebooting AGRAN OS..."]))
        .with_action(ShellAction::Power(PowerAction::Reboot))
}

/// Foreground colour for a `font` argument. `None` for names not offered.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::LightGray,
        _ => return None,
    };
    Some(color)
}

fn cmd_font(args: &[&str]) -> CmdResult {
    let Some(&name) = args.first() else {
        return usage("font <color>");
    };
    if name == "black" {
        return CmdResult::err(String::from(
            "Black color is not supported. Default is white on black.",
        ));
    }
    match parse_color(name) {
        Some(color) => CmdResult::ok_one(String::from("Text color changed."))
            .with_action(ShellAction::SetColor(ColorCode::new(color, Color::Black))),
        None => CmdResult::err(String::from(
            "Unknown color. Supported: red, green, yellow, blue, magenta, cyan, white",
        )),
    }
}

fn cmd_history(history: &History) -> CmdResult {
    let mut out = vec![String::from("Command History:")];
    out.extend(
        history
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!("{}: {}", i + 1, cmd)),
    );
    CmdResult::ok(out)
}

// ════════════════════════════════════════════════════════════
// Filesystem
// ════════════════════════════════════════════════════════════

fn list_files(fs: &FileTable, out: &mut Vec<String>) {
    if fs.is_empty() {
        out.push(String::from("No files."));
    } else {
        out.extend(fs.list().map(String::from));
    }
}

fn fs_error(e: FsError) -> CmdResult {
    CmdResult::err(format!("Error: {}", e))
}

fn cmd_ls(fs: &FileTable) -> CmdResult {
    let mut out = Vec::new();
    list_files(fs, &mut out);
    CmdResult::ok(out)
}

fn cmd_create(args: &[&str], fs: &mut FileTable) -> CmdResult {
    let Some(&name) = args.first() else {
        return usage("create <filename>");
    };
    match fs.create(name) {
        Ok(()) => CmdResult::ok_one(format!("Created file: {}", name)),
        Err(e) => fs_error(e),
    }
}

fn cmd_write(args: &[&str], fs: &mut FileTable) -> CmdResult {
    let [name, words @ ..] = args else {
        return usage("write <filename> <content>");
    };
    if words.is_empty() {
        return usage("write <filename> <content>");
    }
    match fs.write(name, &words.join(" ")) {
        Ok(()) => CmdResult::ok_empty(),
        Err(e) => fs_error(e),
    }
}

fn cmd_read(args: &[&str], fs: &mut FileTable) -> CmdResult {
    let Some(&name) = args.first() else {
        return usage("read <filename>");
    };
    match fs.read(name) {
        Ok(content) => CmdResult::ok_one(String::from(content)),
        Err(e) => fs_error(e),
    }
}

fn cmd_delete(args: &[&str], fs: &mut FileTable) -> CmdResult {
    let Some(&name) = args.first() else {
        return usage("delete <filename>");
    };
    // Deleting a missing file is silent.
    fs.delete(name);
    CmdResult::ok_empty()
}

fn cmd_search(args: &[&str], fs: &mut FileTable) -> CmdResult {
    let Some(&name) = args.first() else {
        return usage("search <filename>");
    };
    if fs.search(name) {
        CmdResult::ok_one(format!("Found: {}", name))
    } else {
        CmdResult::err(String::from("File not found"))
    }
}

fn cmd_filedemo(fs: &mut FileTable) -> CmdResult {
    const NAME: &str = "test.txt";
    let mut out = lines(&["", "=== File System Demo ==="]);

    match fs.create(NAME) {
        Ok(()) => out.push(format!("Created file: {}", NAME)),
        Err(e) => out.push(format!("Error: {}", e)),
    }
    if let Err(e) = fs.write(NAME, "Hello, AGRAN OS!") {
        out.push(format!("Error: {}", e));
    }
    match fs.read(NAME) {
        Ok(content) => out.push(format!("Reading {}: {}", NAME, content)),
        Err(e) => out.push(format!("Error: {}", e)),
    }
    list_files(fs, &mut out);
    fs.delete(NAME);
    list_files(fs, &mut out);
    CmdResult::ok(out)
}

// ════════════════════════════════════════════════════════════
// Process
// ════════════════════════════════════════════════════════════

fn cmd_ps(sched: &Scheduler) -> CmdResult {
    let mut out = LineBuffer::new();
    render_processes(&sched.snapshot(), &mut out);
    CmdResult::ok(out.into_lines())
}

fn cmd_run(args: &[&str], sched: &mut Scheduler) -> CmdResult {
    let Some(&name) = args.first() else {
        return CmdResult {
            output: lines(&[
                "Error: Please provide a process name",
                "Usage: run <process_name> [work]",
            ]),
            success: false,
            action: None,
        };
    };
    let work = match args.get(1) {
        None => sched.default_quantum(),
        Some(w) => match w.parse::<i32>() {
            Ok(w) if w > 0 => w,
            _ => return usage("run <process_name> [work]"),
        },
    };

    let mut out = LineBuffer::new();
    let result = sched.create(name, work, &mut out);
    let mut output = out.into_lines();
    match result {
        Ok(pid) => {
            output.push(format!("Created process '{}' with PID {}", name, pid));
            CmdResult::ok(output)
        }
        Err(e) => {
            log::info!("shell: run '{}' failed: {}", name, e);
            output.push(format!("Error: Failed to create process '{}'", name));
            CmdResult { output, success: false, action: None }
        }
    }
}

fn cmd_kill(args: &[&str], sched: &mut Scheduler) -> CmdResult {
    let Some(&arg) = args.first() else {
        return usage("kill <pid>");
    };
    let pid = arg.parse::<usize>().ok().and_then(|slot| sched.pid_at(slot));

    let mut out = LineBuffer::new();
    let result = pid
        .ok_or(ProcessError::InvalidHandle)
        .and_then(|pid| sched.kill(pid, &mut out));
    let mut output = out.into_lines();
    match result {
        Ok(()) => {
            output.push(format!("Killed process with PID {}", arg));
            CmdResult::ok(output)
        }
        Err(_) => {
            output.push(format!("No such process with PID {}", arg));
            CmdResult { output, success: false, action: None }
        }
    }
}

/// Number of scheduling steps the demo runs.
const DEMO_TICKS: usize = 6;

fn cmd_demo(sched: &mut Scheduler) -> CmdResult {
    let mut out = LineBuffer::new();
    out.emit_line("");
    out.emit_line("=== Process Scheduling Demo ===");

    for name in ["Task1", "Task2", "Task3"] {
        if let Err(e) = sched.create(name, 2, &mut out) {
            crate::console_println!(&mut out, "Error: Failed to create process '{}' ({})", name, e);
        }
    }

    out.emit_line("");
    out.emit_line("Running processes for demo...");
    for _ in 0..DEMO_TICKS {
        sched.tick(&mut out);
    }

    for slot in 0..sched.table().capacity() {
        if let Some(pid) = sched.pid_at(slot) {
            // Resolved from a live slot just above, so this cannot fail.
            let _ = sched.kill(pid, &mut out);
        }
    }

    out.emit_line("");
    out.emit_line("Demo completed.");
    CmdResult::ok(out.into_lines())
}

// ════════════════════════════════════════════════════════════
// Math
// ════════════════════════════════════════════════════════════

/// Banner printed on entering calculator mode.
pub const CALCULATOR_BANNER: &str = "Calculator mode. Type expressions like 2+3 or 'exit' to quit.";

fn cmd_calculator(args: &[&str]) -> CmdResult {
    if args.is_empty() {
        return CmdResult::ok_one(String::from(CALCULATOR_BANNER))
            .with_action(ShellAction::EnterCalculator);
    }
    calculate(&args.join(" "))
}

/// Evaluate one calculator line.
pub fn calculate(expr: &str) -> CmdResult {
    match calc::evaluate(expr) {
        Ok(value) => CmdResult::ok_one(format!("{}", value)),
        Err(e) => CmdResult::err(format!("{}", e)),
    }
}
