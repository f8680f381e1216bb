//! Solvency CLI - bankruptcy risk prediction from financial ratios.
//!
//! Loads the fitted scaler and decision tree once, builds a feature vector
//! from a canned example or manual input, and prints the prediction.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use solvency_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so that stdout carries only results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("solvency_cli=info".parse()?)
                .add_directive("solvency_serving=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    info!("Solvency CLI starting...");

    match &cli.command {
        Commands::Predict(cmd) => cmd.run(&cli.model)?,
        Commands::Features(cmd) => cmd.run(&cli.model)?,
        Commands::Inspect(cmd) => cmd.run(&cli.model)?,
    }

    Ok(())
}
