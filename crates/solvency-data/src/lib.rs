//! Reference dataset loading for solvency.
//!
//! The reference dataset is the labelled CSV the model was trained on. The
//! predictor never feeds it to the model directly. It supplies:
//!
//! - two canned examples (the first bankrupt and first non-bankrupt row),
//! - per-feature means used to pre-fill manual input,
//! - the header order, which the serving layer checks against the artifacts.
//!
//! # Example
//!
//! ```
//! use solvency_core::Label;
//! use solvency_data::{ReferenceDataset, DEFAULT_LABEL_COLUMN};
//!
//! let csv = "Bankrupt?,Debt ratio %\n1,0.8\n0,0.2\n";
//! let ds = ReferenceDataset::from_reader(csv.as_bytes(), DEFAULT_LABEL_COLUMN).unwrap();
//! assert_eq!(ds.first_with_label(Label::Bankrupt).unwrap().get("Debt ratio %"), Some(0.8));
//! assert_eq!(ds.mean_values(), vec![0.5]);
//! ```

pub mod csv;
pub mod dataset;
pub mod error;

pub use dataset::{ReferenceDataset, DEFAULT_LABEL_COLUMN};
pub use error::{DataError, DataResult};
