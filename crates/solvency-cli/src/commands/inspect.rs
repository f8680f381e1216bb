//! Inspect Command Implementation
//!
//! Loads both artifacts, validates them against each other and, when a dataset
//! is available, against its header.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use solvency_serving::{open_dataset, ClassifierArtifact};
use tracing::warn;

use crate::{load_context, ModelArgs};

/// Load the artifacts and print a summary
#[derive(Args, Debug, Clone, Default)]
pub struct InspectCommand {
    /// Skip the dataset header check
    #[arg(long)]
    pub skip_dataset: bool,
}

impl InspectCommand {
    /// Execute the inspect command
    pub fn run(&self, model: &ModelArgs) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(model, &mut out)
    }

    /// Execute, writing results to `out`.
    pub fn execute(&self, model: &ModelArgs, out: &mut impl Write) -> Result<()> {
        let config = model.pipeline_config()?;
        let context = load_context(&config)?;

        writeln!(out, "Scaler:     {} ({})", context.scaler().kind(), config.scaler_path().display())?;
        writeln!(
            out,
            "Classifier: {} ({})",
            context.classifier().kind(),
            config.classifier_path().display()
        )?;
        writeln!(out, "Features:   {}", context.schema().len())?;

        match context.classifier() {
            ClassifierArtifact::DecisionTree(tree) => {
                writeln!(
                    out,
                    "Tree:       {} nodes, {} leaves, depth {}",
                    tree.node_count(),
                    tree.leaf_count(),
                    tree.depth()
                )?;
            }
        }

        if self.skip_dataset {
            return Ok(());
        }

        let status = match open_dataset(&config) {
            Ok(None) => "not configured".to_string(),
            Ok(Some(dataset)) => match context.check_dataset_schema(&dataset) {
                Ok(()) => format!("{} rows, header matches", dataset.len()),
                Err(e) => format!("{} rows, {}", dataset.len(), e),
            },
            Err(e) => {
                warn!("Could not read dataset: {}", e);
                format!("unreadable ({})", e)
            }
        };
        writeln!(out, "Dataset:    {}", status)?;
        Ok(())
    }
}
