//! WordSleuth — parallel forbidden-word scanner and redactor.
//!
//! Thin binary entry point. All logic lives in the `wordsleuth-core`
//! and `wordsleuth-cli` crates.

use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args = wordsleuth_cli::Args::parse();

    // Initialise structured logging on stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("WordSleuth starting");

    wordsleuth_cli::run(args)
}
