//! Artifact loading and inference for the solvency bankruptcy predictor.
//!
//! This crate turns a named feature vector into a binary prediction using two
//! artifacts fitted offline: a feature scaler and a decision-tree classifier.
//!
//! # Architecture
//!
//! ```text
//!  scaler.json   decision_tree.json
//!       │               │
//!       └──────┬────────┘
//!              ▼
//!      load_artifacts()        open, parse, validate; handles closed on return
//!              │
//!              ▼
//!      PipelineContext         both artifacts + pinned FeatureSchema
//!              │
//!              ▼
//!      InferencePipeline       align by name → scale → decide → Label
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use solvency_core::Label;
//! use solvency_data::ReferenceDataset;
//! use solvency_serving::{InferencePipeline, PipelineConfig, PipelineContext};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::builder().model_dir("/models/bankruptcy").build();
//! let context = PipelineContext::load(&config)?;
//!
//! let dataset = ReferenceDataset::open(config.dataset_path().unwrap(), &config.label_column)?;
//! context.check_dataset_schema(&dataset)?;
//!
//! let pipeline = InferencePipeline::new(context);
//! let example = dataset.first_with_label(Label::Bankrupt).unwrap();
//! println!("Prediction: {}", pipeline.predict(&example)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`ServingResult<T>`] which wraps [`ServingError`]:
//!
//! ```
//! use solvency_serving::error::{ServingError, ServingResult};
//! use solvency_core::Label;
//!
//! fn handle(result: ServingResult<Label>) {
//!     match result {
//!         Ok(label) => println!("Prediction: {}", label),
//!         Err(ServingError::InvalidInput(e)) => println!("Fix the input: {}", e),
//!         Err(e) if e.is_fatal() => println!("Cannot predict: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod scaler;

pub use artifact::{load_artifacts, read_artifact};
pub use classifier::{ClassifierArtifact, DecisionTree, TreeNode};
pub use config::{ConfigError, PipelineConfig, PipelineConfigBuilder};
pub use context::{open_dataset, PipelineContext};
pub use error::{ServingError, ServingResult};
pub use pipeline::InferencePipeline;
pub use scaler::{MinMaxScaler, ScalerArtifact, StandardScaler};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
