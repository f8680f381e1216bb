//! Artifact file loading.
//!
//! Artifacts are JSON documents produced offline. Each file is opened inside
//! [`read_artifact`] and its handle is dropped before the function returns,
//! whether parsing succeeds or not.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::classifier::ClassifierArtifact;
use crate::error::{ServingError, ServingResult};
use crate::scaler::ScalerArtifact;

/// Loads and validates both artifacts.
///
/// Nothing is returned unless both load; a failure on the classifier discards
/// the already-parsed scaler.
///
/// # Errors
///
/// Returns [`ServingError::ArtifactLoadError`] if either file is missing,
/// unreadable, not valid JSON, or fails validation.
pub fn load_artifacts(
    scaler_path: impl AsRef<Path>,
    classifier_path: impl AsRef<Path>,
) -> ServingResult<(ScalerArtifact, ClassifierArtifact)> {
    let scaler: ScalerArtifact = read_artifact(scaler_path.as_ref(), "scaler")?;
    debug!(
        "Scaler: type={}, features={}",
        scaler.kind(),
        scaler.feature_names().len()
    );

    let classifier: ClassifierArtifact = read_artifact(classifier_path.as_ref(), "classifier")?;
    debug!(
        "Classifier: type={}, features={}",
        classifier.kind(),
        classifier.feature_names().len()
    );

    Ok((scaler, classifier))
}

/// Reads one JSON artifact of type `T`.
pub fn read_artifact<T: DeserializeOwned>(path: &Path, what: &str) -> ServingResult<T> {
    info!("Loading {} artifact from: {:?}", what, path);

    let file = File::open(path).map_err(|e| {
        ServingError::artifact_load(format!(
            "Failed to open {} artifact at {:?}: {}",
            what, path, e
        ))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ServingError::artifact_load(format!(
            "Failed to parse {} artifact at {:?}: {}",
            what, path, e
        ))
    })
}
