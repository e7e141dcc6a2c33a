mod app;
mod cli;
mod commands;
mod config;
mod export;
mod output;
mod session;
mod text;
mod tui;
mod views;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // The UI owns the terminal; log lines would corrupt the screen.
    if !matches!(cli.command, cli::Command::Ui(_)) {
        init_logging(cli.verbose);
    }

    match commands::run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}
