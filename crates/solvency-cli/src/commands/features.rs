//! Features Command Implementation
//!
//! Lists the financial ratios in dataset order, grouped, with the population
//! mean used to pre-fill manual input.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use solvency_core::FeatureSchema;

use crate::{load_dataset, ModelArgs};

/// List feature names by group with their dataset means
#[derive(Args, Debug, Clone, Default)]
pub struct FeaturesCommand {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct GroupListing<'a> {
    group: &'a str,
    features: Vec<FeatureListing<'a>>,
}

#[derive(Debug, Serialize)]
struct FeatureListing<'a> {
    index: usize,
    name: &'a str,
    mean: f64,
}

impl FeaturesCommand {
    /// Execute the features command
    pub fn run(&self, model: &ModelArgs) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(model, &mut out)
    }

    /// Execute, writing results to `out`.
    pub fn execute(&self, model: &ModelArgs, out: &mut impl Write) -> Result<()> {
        let config = model.pipeline_config()?;
        let dataset = load_dataset(&config)?;
        let schema = FeatureSchema::new(dataset.feature_names().to_vec())
            .context("Dataset header is not a valid feature list")?;
        let means = dataset.mean_values();

        let groups = schema.groups();
        let listings: Vec<GroupListing<'_>> = groups
            .iter()
            .map(|group| GroupListing {
                group: group.title(),
                features: group
                    .range()
                    .map(|i| FeatureListing {
                        index: i,
                        name: &schema.names()[i],
                        mean: means[i],
                    })
                    .collect(),
            })
            .collect();

        if self.json {
            serde_json::to_writer_pretty(&mut *out, &listings)?;
            writeln!(out)?;
            return Ok(());
        }

        for listing in &listings {
            writeln!(out, "{} ({} features)", listing.group, listing.features.len())?;
            for f in &listing.features {
                writeln!(out, "  {:>3}  {:<60} {:>14.6}", f.index, f.name.trim(), f.mean)?;
            }
        }
        let covered: usize = listings.iter().map(|l| l.features.len()).sum();
        if covered < schema.len() {
            writeln!(out, "({} further features are not grouped)", schema.len() - covered)?;
        }
        Ok(())
    }
}
