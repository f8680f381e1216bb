//! Core types for the solvency bankruptcy predictor.
//!
//! This crate holds the data model shared by the dataset reader, the inference
//! pipeline and the command-line front end:
//!
//! - [`FeatureSchema`]: the pinned, ordered list of feature names the artifacts
//!   were fitted with.
//! - [`FeatureVector`]: a named mapping of raw indicator values.
//! - [`Label`] / [`PredictionResult`]: the binary outcome.
//! - [`FeatureGroup`]: display groups over the feature order.
//! - [`FeatureError`]: every way a vector can fail to line up with the schema.
//!
//! # Example
//!
//! ```
//! use solvency_core::{FeatureSchema, FeatureVector};
//!
//! let schema = FeatureSchema::new(vec!["Debt ratio %".into(), "Cash/Total Assets".into()])
//!     .unwrap();
//! let mut v = FeatureVector::new();
//! v.set("Cash/Total Assets", 0.12);
//! v.set("Debt ratio %", 0.40);
//!
//! // Resolved by name, so entry order does not matter.
//! assert_eq!(schema.align(&v).unwrap(), vec![0.40, 0.12]);
//! ```

pub mod error;
pub mod group;
pub mod label;
pub mod schema;
pub mod vector;

pub use error::{FeatureError, Result};
pub use group::FeatureGroup;
pub use label::{InvalidLabel, Label, PredictionResult};
pub use schema::FeatureSchema;
pub use vector::FeatureVector;

/// Number of financial ratios the bundled model is fitted on.
pub const EXPECTED_FEATURE_COUNT: usize = 95;
