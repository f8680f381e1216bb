//! Pipeline configuration.
//!
//! Describes where the artifacts and the reference dataset live and how many
//! features the artifacts are expected to carry.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use solvency_core::EXPECTED_FEATURE_COUNT;
use solvency_data::DEFAULT_LABEL_COLUMN;

/// Default scaler artifact file name.
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Default classifier artifact file name.
pub const DEFAULT_CLASSIFIER_FILE: &str = "decision_tree.json";

/// Default reference dataset file name.
pub const DEFAULT_DATASET_FILE: &str = "data.csv";

/// Configuration for loading a [`PipelineContext`](crate::PipelineContext).
///
/// Relative file paths are resolved against `model_dir`; absolute ones are
/// used as-is.
///
/// # Example
///
/// ```
/// use solvency_serving::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .model_dir("/models/bankruptcy")
///     .classifier_file("tree-v2.json")
///     .build();
///
/// assert_eq!(
///     config.classifier_path(),
///     std::path::PathBuf::from("/models/bankruptcy/tree-v2.json")
/// );
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the artifacts (default: ".")
    pub model_dir: PathBuf,

    /// Scaler artifact file
    pub scaler_file: PathBuf,

    /// Classifier artifact file
    pub classifier_file: PathBuf,

    /// Reference dataset; `None` disables example rows and mean pre-fill
    pub dataset_file: Option<PathBuf>,

    /// Label column in the reference dataset
    pub label_column: String,

    /// Feature count the artifacts must carry; `None` accepts any
    pub expected_features: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("."),
            scaler_file: PathBuf::from(DEFAULT_SCALER_FILE),
            classifier_file: PathBuf::from(DEFAULT_CLASSIFIER_FILE),
            dataset_file: Some(PathBuf::from(DEFAULT_DATASET_FILE)),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            expected_features: Some(EXPECTED_FEATURE_COUNT),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidConfigFile(format!("{:?}: {}", path, e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ConfigError::InvalidConfigFile(format!("{:?}: {}", path, e)))
    }

    /// Resolved scaler artifact path.
    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.scaler_file)
    }

    /// Resolved classifier artifact path.
    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join(&self.classifier_file)
    }

    /// Resolved dataset path, if a dataset is configured.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset_file.as_ref().map(|f| self.model_dir.join(f))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scaler_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("scaler_file"));
        }
        if self.classifier_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("classifier_file"));
        }
        if matches!(&self.dataset_file, Some(f) if f.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyPath("dataset_file"));
        }
        if self.label_column.trim().is_empty() {
            return Err(ConfigError::EmptyLabelColumn);
        }
        if self.expected_features == Some(0) {
            return Err(ConfigError::InvalidFeatureCount);
        }
        Ok(())
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    model_dir: Option<PathBuf>,
    scaler_file: Option<PathBuf>,
    classifier_file: Option<PathBuf>,
    dataset_file: Option<Option<PathBuf>>,
    label_column: Option<String>,
    expected_features: Option<Option<usize>>,
}

impl PipelineConfigBuilder {
    /// Set the artifact directory.
    pub fn model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Set the scaler artifact file.
    pub fn scaler_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.scaler_file = Some(file.into());
        self
    }

    /// Set the classifier artifact file.
    pub fn classifier_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.classifier_file = Some(file.into());
        self
    }

    /// Set the reference dataset file.
    pub fn dataset_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.dataset_file = Some(Some(file.into()));
        self
    }

    /// Run without a reference dataset.
    pub fn no_dataset(mut self) -> Self {
        self.dataset_file = Some(None);
        self
    }

    /// Set the label column name.
    pub fn label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    /// Set the expected feature count, or `None` to accept any.
    pub fn expected_features(mut self, count: Option<usize>) -> Self {
        self.expected_features = Some(count);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            model_dir: self.model_dir.unwrap_or(default.model_dir),
            scaler_file: self.scaler_file.unwrap_or(default.scaler_file),
            classifier_file: self.classifier_file.unwrap_or(default.classifier_file),
            dataset_file: self.dataset_file.unwrap_or(default.dataset_file),
            label_column: self.label_column.unwrap_or(default.label_column),
            expected_features: self.expected_features.unwrap_or(default.expected_features),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A file setting is empty
    #[error("Invalid path: {0} cannot be empty")]
    EmptyPath(&'static str),

    /// Label column is blank
    #[error("Invalid label column: cannot be empty")]
    EmptyLabelColumn,

    /// Expected feature count of zero
    #[error("Invalid expected feature count: must be at least 1")]
    InvalidFeatureCount,

    /// Invalid configuration file
    #[error("Invalid configuration file: {0}")]
    InvalidConfigFile(String),
}
