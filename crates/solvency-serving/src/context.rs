//! The loaded pipeline context.
//!
//! A [`PipelineContext`] owns both artifacts and the feature schema they agree
//! on. It is built once at startup and passed to whatever needs to predict;
//! nothing about it is global.

use std::path::Path;

use solvency_core::FeatureSchema;
use solvency_data::ReferenceDataset;
use tracing::{info, warn};

use crate::artifact::load_artifacts;
use crate::classifier::ClassifierArtifact;
use crate::config::PipelineConfig;
use crate::error::{ServingError, ServingResult};
use crate::scaler::ScalerArtifact;

/// Immutable artifacts plus their pinned feature order.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    schema: FeatureSchema,
    scaler: ScalerArtifact,
    classifier: ClassifierArtifact,
}

impl PipelineContext {
    /// Pairs two artifacts, pinning their shared feature order.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::ArtifactLoadError`] if the artifacts were fitted
    /// on different feature names or orders, or the names do not form a valid
    /// schema.
    pub fn new(scaler: ScalerArtifact, classifier: ClassifierArtifact) -> ServingResult<Self> {
        let names = scaler.feature_names();
        if names != classifier.feature_names() {
            let detail = first_difference(names, classifier.feature_names());
            return Err(ServingError::artifact_load(format!(
                "scaler and classifier feature names differ: {}",
                detail
            )));
        }

        let schema = FeatureSchema::new(names.to_vec())
            .map_err(|e| ServingError::artifact_load(format!("invalid feature names: {}", e)))?;

        Ok(Self {
            schema,
            scaler,
            classifier,
        })
    }

    /// Loads both artifacts from explicit paths.
    pub fn from_paths(
        scaler_path: impl AsRef<Path>,
        classifier_path: impl AsRef<Path>,
    ) -> ServingResult<Self> {
        let (scaler, classifier) = load_artifacts(scaler_path, classifier_path)?;
        Self::new(scaler, classifier)
    }

    /// Loads the artifacts named by `config`.
    ///
    /// Also enforces `config.expected_features` when set.
    pub fn load(config: &PipelineConfig) -> ServingResult<Self> {
        config.validate()?;

        let context = Self::from_paths(config.scaler_path(), config.classifier_path())?;

        if let Some(expected) = config.expected_features {
            if context.schema.len() != expected {
                return Err(ServingError::artifact_load(format!(
                    "artifacts carry {} features, expected {}",
                    context.schema.len(),
                    expected
                )));
            }
        }

        info!(
            "Pipeline ready: {} scaler, {} classifier, {} features",
            context.scaler.kind(),
            context.classifier.kind(),
            context.schema.len()
        );
        Ok(context)
    }

    /// The pinned feature order.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The scaler artifact.
    pub fn scaler(&self) -> &ScalerArtifact {
        &self.scaler
    }

    /// The classifier artifact.
    pub fn classifier(&self) -> &ClassifierArtifact {
        &self.classifier
    }

    /// Checks that the dataset header lists exactly the fitted features, in
    /// fitted order.
    ///
    /// Row-derived vectors are resolved by name either way; a mismatch here
    /// means the dataset and the artifacts come from different training runs.
    pub fn check_dataset_schema(&self, dataset: &ReferenceDataset) -> ServingResult<()> {
        let header = dataset.feature_names();
        if self.schema.same_order(header) {
            return Ok(());
        }
        let detail = first_difference(self.schema.names(), header);
        warn!("Dataset header does not match artifact features: {}", detail);
        Err(ServingError::schema_mismatch(format!(
            "dataset header does not match artifact features: {}",
            detail
        )))
    }
}

/// Opens the reference dataset named by `config`.
///
/// Returns `Ok(None)` when no dataset is configured.
///
/// # Errors
///
/// Returns [`ServingError::Dataset`] if the file cannot be read or parsed.
pub fn open_dataset(config: &PipelineConfig) -> ServingResult<Option<ReferenceDataset>> {
    let Some(path) = config.dataset_path() else {
        return Ok(None);
    };
    let dataset = ReferenceDataset::open(&path, &config.label_column)?;
    Ok(Some(dataset))
}

fn first_difference(expected: &[String], actual: &[String]) -> String {
    if expected.len() != actual.len() {
        return format!("{} names vs {}", expected.len(), actual.len());
    }
    expected
        .iter()
        .zip(actual)
        .enumerate()
        .find(|(_, (a, b))| a != b)
        .map(|(i, (a, b))| format!("position {}: {:?} vs {:?}", i, a, b))
        .unwrap_or_else(|| "no difference".to_string())
}
