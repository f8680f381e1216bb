//! Solvency CLI Library
//!
//! This crate provides the command-line front end for the bankruptcy
//! predictor:
//!
//! - **Predict**: classify a canned dataset row or a manually entered vector
//! - **Features**: list the 95 ratios by group with their dataset means
//! - **Inspect**: load and summarize the artifacts
//!
//! # Example
//!
//! ```bash
//! # Predict the dataset's first bankrupt company
//! solvency --model-dir ./model predict --mode bankrupt-example
//!
//! # Start from the means and override two ratios
//! solvency --model-dir ./model predict --mode manual \
//!     --set " Debt ratio %=0.9" --set " Cash/Total Assets=0.01"
//!
//! # Summarize the artifacts
//! solvency --model-dir ./model inspect
//! ```

pub mod commands;
pub mod input;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use solvency_data::ReferenceDataset;
use solvency_serving::{open_dataset, PipelineConfig, PipelineContext};
use tracing::debug;

pub use commands::{FeaturesCommand, InspectCommand, PredictCommand};
pub use input::InputMode;

/// Notice printed under every prediction.
pub const DISCLAIMER: &str = "Academic disclaimer: this prediction is the output of a \
machine learning model and must not be treated as a definitive real-world decision.";

/// Solvency - bankruptcy risk prediction from 95 financial ratios
///
/// Loads a fitted scaler and decision tree and classifies a company as
/// bankrupt or not bankrupt.
#[derive(Parser, Debug)]
#[command(name = "solvency")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Artifact and dataset locations
    #[command(flatten)]
    pub model: ModelArgs,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict bankruptcy for a canned example or manual input
    Predict(PredictCommand),

    /// List feature names by group with their dataset means
    Features(FeaturesCommand),

    /// Load the artifacts and print a summary
    Inspect(InspectCommand),
}

/// Where to find the artifacts and the reference dataset.
///
/// Flags override values from `--config`, which override the defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// JSON configuration file
    #[arg(long, global = true, env = "SOLVENCY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the artifacts
    #[arg(long, short = 'd', global = true, env = "SOLVENCY_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Scaler artifact (relative to the model directory)
    #[arg(long, global = true, env = "SOLVENCY_SCALER")]
    pub scaler: Option<PathBuf>,

    /// Classifier artifact (relative to the model directory)
    #[arg(long, global = true, env = "SOLVENCY_CLASSIFIER")]
    pub classifier: Option<PathBuf>,

    /// Reference dataset CSV (relative to the model directory)
    #[arg(long, global = true, env = "SOLVENCY_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Label column in the reference dataset
    #[arg(long, global = true, env = "SOLVENCY_LABEL_COLUMN")]
    pub label_column: Option<String>,
}

impl ModelArgs {
    /// Merges flags over the config file (if any) over defaults.
    pub fn pipeline_config(&self) -> CliResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = &self.model_dir {
            config.model_dir = dir.clone();
        }
        if let Some(scaler) = &self.scaler {
            config.scaler_file = scaler.clone();
        }
        if let Some(classifier) = &self.classifier {
            config.classifier_file = classifier.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.dataset_file = Some(dataset.clone());
        }
        if let Some(column) = &self.label_column {
            config.label_column = column.clone();
        }
        config.validate()?;
        debug!("Pipeline configuration: {:?}", config);
        Ok(config)
    }
}

/// Loads the context named by `config`.
pub fn load_context(config: &PipelineConfig) -> CliResult<PipelineContext> {
    PipelineContext::load(config).context("Failed to load model artifacts")
}

/// Loads the reference dataset named by `config`.
pub fn load_dataset(config: &PipelineConfig) -> CliResult<ReferenceDataset> {
    open_dataset(config)
        .with_context(|| {
            let path = config.dataset_path().unwrap_or_default();
            format!("Failed to load reference dataset {}", path.display())
        })?
        .context("No reference dataset configured")
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
