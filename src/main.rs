use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod services;

use crate::cli::{Cli, Commands};
use crate::commands::{handle_finder, handle_submit};
use crate::config::Config;
use crate::error::AppError;
use crate::services::output::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // A failed batch has already printed its report.
            let reported = matches!(
                e.downcast_ref::<AppError>(),
                Some(AppError::BatchFailed { .. })
            );
            if !(cli.json && reported) {
                print_error(cli.json, &e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = Config::load(cli)?;
    match &cli.command {
        Commands::Submit(args) => handle_submit(cli, args, &cfg),
        Commands::Finder(args) => handle_finder(cli, args, &cfg),
    }
}
