/// WordSleuth CLI — console frontend.
///
/// This crate contains all terminal-facing code. Business logic lives in
/// `wordsleuth-core`.
pub mod args;
pub mod commands;
pub mod console;
pub mod export;

pub use args::Args;
pub use console::{ConsolePhase, ConsoleState};

use anyhow::Context;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

/// Interval between event-loop ticks while a scan runs.
const TICK: Duration = Duration::from_millis(50);

/// Run one scan end to end: load words, scan, render, optionally export.
pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    args.validate().map_err(anyhow::Error::msg)?;
    let words = args.load_words()?;
    let config = args.scan_config();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut console = ConsoleState::new(args.quiet);
    console
        .start(args.root.clone(), words, config)
        .with_context(|| format!("cannot scan {}", args.root.display()))?;

    let commands = if args.no_input {
        None
    } else {
        writeln!(out, "Commands: p = pause, r = resume, s = stop")?;
        Some(commands::spawn_stdin_reader().context("failed to read commands from stdin")?)
    };

    while console.is_running() {
        if let Some(rx) = &commands {
            while let Ok(command) = rx.try_recv() {
                console.apply(command, &mut out)?;
            }
        }
        console.process_events(&mut out)?;
        if console.is_running() {
            std::thread::sleep(TICK);
        }
    }

    if let (Some(path), Some(report)) = (&args.export, console.report()) {
        export::write_report(report, path)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        writeln!(out, "Report written to {}", path.display())?;
    }

    Ok(console.exit_code())
}
