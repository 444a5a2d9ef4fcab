use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;

use hojalibre::cli::Cli;
use hojalibre::logging::{self, Logger};
use hojalibre::unlock::{SUPPORTED_EXTENSIONS, has_supported_extension};
use hojalibre::{UnlockOutcome, UnlockPipeline};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", style(format!("│ Error: {error:#}")).red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.log, cli.logfile.as_deref())?;

    let logger = Logger::default();
    if !has_supported_extension(&cli.input) {
        logger.warn(format_args!(
            "{} no tiene una extensión reconocida ({}); se procesa igualmente.",
            cli.input.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        ));
    }

    let pipeline = UnlockPipeline::with_logger(&cli.input, cli.output.as_deref(), logger)?;
    let outcome = pipeline.run();

    match &outcome {
        UnlockOutcome::Success { .. } => {
            println!("{}", style(format!("│ {}", outcome.status_message())).green());
        }
        UnlockOutcome::Failure { .. } => {
            eprintln!("{}", style(format!("│ {}", outcome.status_message())).red());
        }
    }

    Ok(outcome.is_success())
}
