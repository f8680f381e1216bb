//! CLI Command Implementations
//!
//! - `predict`: classify one company
//! - `features`: list the feature groups
//! - `inspect`: summarize the loaded artifacts

mod features;
mod inspect;
mod predict;

pub use features::FeaturesCommand;
pub use inspect::InspectCommand;
pub use predict::{PredictCommand, PredictionReport};
