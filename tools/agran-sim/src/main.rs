use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use agran_kernel::console::Console;
use agran_kernel::drivers::vga::Screen;
use agran_kernel::logger;
use clap::Parser;

use agran_sim::cli::Cli;
use agran_sim::config;
use agran_sim::error::SimError;
use agran_sim::host::{stderr_sink, LocalClock, StreamConsole};
use agran_sim::sim::{self, Outcome};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => {
            log::debug!("exit after {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("agran-sim: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome, SimError> {
    logger::init(stderr_sink, cli.log_level.into())?;
    let config = config::load(cli.config.as_deref())?;

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|source| {
            SimError::Read {
                path: path.clone(),
                source,
            }
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    if cli.screen {
        let mut screen = Screen::new();
        let outcome = sim::run(config, Box::new(LocalClock), input, &mut screen)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", screen.dump())?;
        return Ok(outcome);
    }

    let mut console = StreamConsole::new(io::stdout().lock());
    let outcome = sim::run(config, Box::new(LocalClock), input, &mut console);
    // End the last prompt line before the shell exits.
    console.write_str("\n");
    let _ = console.finish()?;
    outcome
}
