//! Predict Command Implementation
//!
//! Builds a feature vector in one of the three input modes, runs it through
//! the inference pipeline and prints the verdict with the disclaimer.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use solvency_core::{FeatureVector, Label};
use solvency_serving::InferencePipeline;
use tracing::info;

use crate::input::{build_features, parse_assignment, read_overrides, InputMode};
use crate::{load_context, load_dataset, ModelArgs, DISCLAIMER};

/// Predict bankruptcy for one company
///
/// # Example
///
/// ```bash
/// solvency --model-dir ./model predict --mode manual --set " Debt ratio %=0.9"
/// ```
#[derive(Args, Debug, Clone)]
pub struct PredictCommand {
    /// Input scenario
    #[arg(long, short = 'm', value_enum, default_value = "manual")]
    pub mode: InputMode,

    /// Override one feature as NAME=VALUE (manual mode, repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, f64)>,

    /// JSON object of feature overrides (manual mode)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Also print every feature value, grouped
    #[arg(long)]
    pub show_features: bool,
}

/// Machine-readable prediction output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Input scenario used
    pub mode: InputMode,
    /// Numeric label (1 = bankrupt)
    pub label: Label,
    /// Whether the company is predicted bankrupt
    pub bankrupt: bool,
    /// Human-readable verdict
    pub verdict: String,
    /// Tree nodes visited, root to leaf
    pub decision_path_len: usize,
}

impl PredictCommand {
    /// Execute the predict command
    pub fn run(&self, model: &ModelArgs) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(model, &mut out)
    }

    /// Execute, writing results to `out`.
    pub fn execute(&self, model: &ModelArgs, out: &mut impl Write) -> Result<()> {
        if self.mode != InputMode::Manual && (!self.overrides.is_empty() || self.input.is_some()) {
            anyhow::bail!("--set and --input are only valid with --mode manual");
        }

        let config = model.pipeline_config()?;
        let context = load_context(&config)?;
        let dataset = load_dataset(&config)?;
        context.check_dataset_schema(&dataset)?;

        let mut overrides = match &self.input {
            Some(path) => read_overrides(path)?,
            None => Vec::new(),
        };
        overrides.extend(self.overrides.iter().cloned());

        let features = build_features(self.mode, &dataset, context.schema(), &overrides)?;
        let pipeline = InferencePipeline::new(context);

        let label = pipeline.predict(&features).context("Prediction failed")?;
        let path = pipeline.decision_path(&features)?;
        info!("Mode {:?}: predicted {}", self.mode, label);

        let report = PredictionReport {
            mode: self.mode,
            label,
            bankrupt: label.is_bankrupt(),
            verdict: label.describe().to_string(),
            decision_path_len: path.len(),
        };

        if self.json {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            return Ok(());
        }

        writeln!(out, "Input: {}", report.mode)?;
        if self.show_features {
            write_features(out, &pipeline, &features)?;
        }
        writeln!(out, "Prediction: {}", report.label)?;
        writeln!(out, "{}", report.verdict)?;
        writeln!(out)?;
        writeln!(out, "{}", DISCLAIMER)?;
        Ok(())
    }
}

fn write_features(
    out: &mut impl Write,
    pipeline: &InferencePipeline,
    features: &FeatureVector,
) -> Result<()> {
    let schema = pipeline.context().schema();
    for group in schema.groups() {
        writeln!(out, "[{}]", group.title())?;
        for name in schema.group_names(&group) {
            if let Some(value) = features.get(name) {
                writeln!(out, "  {:<60} {:>14.6}", name.trim(), value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_overrides_outside_manual_mode() {
        let cmd = PredictCommand {
            mode: InputMode::BankruptExample,
            overrides: vec![("x".to_string(), 1.0)],
            input: None,
            json: false,
            show_features: false,
        };
        let mut out = Vec::new();
        let err = cmd.execute(&ModelArgs::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("--mode manual"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report = PredictionReport {
            mode: InputMode::HealthyExample,
            label: Label::NotBankrupt,
            bankrupt: false,
            verdict: Label::NotBankrupt.describe().to_string(),
            decision_path_len: 3,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mode"], "healthy-example");
        assert_eq!(value["label"], 0);
        assert_eq!(value["bankrupt"], false);
    }
}
