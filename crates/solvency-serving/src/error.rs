//! Error types for the solvency-serving crate.
//!
//! This module defines all error types surfaced by artifact loading and the
//! inference pipeline.

use solvency_core::FeatureError;
use solvency_data::DataError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for serving operations.
pub type ServingResult<T> = Result<T, ServingError>;

/// Errors that can occur while loading artifacts or predicting.
#[derive(Debug, Error)]
pub enum ServingError {
    /// An artifact is missing, unreadable, malformed or inconsistent.
    #[error("Failed to load artifact: {0}")]
    ArtifactLoadError(String),

    /// The feature vector does not match the fitted schema.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FeatureError),

    /// The reference dataset disagrees with the fitted schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Reference dataset error.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DataError),
}

impl ServingError {
    /// Create an artifact load error.
    pub fn artifact_load(msg: impl Into<String>) -> Self {
        Self::ArtifactLoadError(msg.into())
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    /// Check if the caller can fix this by supplying different input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if no prediction is possible until the operator intervenes.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArtifactLoadError(_)
                | Self::SchemaMismatch(_)
                | Self::ConfigError(_)
                | Self::Dataset(_)
        )
    }
}
