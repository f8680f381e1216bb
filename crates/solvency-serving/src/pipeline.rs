//! The scale-then-classify inference pipeline.

use std::sync::Arc;

use solvency_core::{FeatureVector, PredictionResult};
use tracing::debug;

use crate::context::PipelineContext;
use crate::error::ServingResult;

/// Deterministic predictor over a shared [`PipelineContext`].
///
/// Cloning is cheap and every method takes `&self`, so one pipeline can serve
/// any number of threads without locking.
///
/// # Example
///
/// ```no_run
/// use solvency_core::FeatureVector;
/// use solvency_serving::{InferencePipeline, PipelineConfig, PipelineContext};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let context = PipelineContext::load(&PipelineConfig::default())?;
/// let pipeline = InferencePipeline::new(context);
///
/// let features: FeatureVector = pipeline
///     .context()
///     .schema()
///     .names()
///     .iter()
///     .map(|name| (name.clone(), 0.0))
///     .collect();
/// println!("{}", pipeline.predict(&features)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    context: Arc<PipelineContext>,
}

impl InferencePipeline {
    /// Wraps a loaded context.
    pub fn new(context: impl Into<Arc<PipelineContext>>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// The shared context.
    pub fn context(&self) -> &Arc<PipelineContext> {
        &self.context
    }

    /// Predicts the label for a named feature vector.
    ///
    /// The vector is resolved by name into fitted order, scaled, then
    /// classified.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::InvalidInput`](crate::ServingError::InvalidInput)
    /// if a feature is missing, unknown or repeated, or a value is not finite.
    pub fn predict(&self, features: &FeatureVector) -> ServingResult<PredictionResult> {
        let mut values = self.context.schema().align(features)?;
        let label = self.classify(&mut values);
        debug!("Predicted {} for {} features", label, features.len());
        Ok(label)
    }

    /// Predicts from values already in fitted order.
    ///
    /// Only the length and finiteness are checked; order is the caller's
    /// responsibility.
    pub fn predict_values(&self, values: &[f64]) -> ServingResult<PredictionResult> {
        self.context.schema().check_values(values)?;
        let mut values = values.to_vec();
        Ok(self.classify(&mut values))
    }

    /// Tree nodes visited for `features`, root first.
    pub fn decision_path(&self, features: &FeatureVector) -> ServingResult<Vec<usize>> {
        let mut values = self.context.schema().align(features)?;
        self.context.scaler().transform_in_place(&mut values);
        Ok(self.context.classifier().decision_path(&values))
    }

    fn classify(&self, values: &mut [f64]) -> PredictionResult {
        self.context.scaler().transform_in_place(values);
        self.context.classifier().decide(values)
    }
}

impl From<PipelineContext> for InferencePipeline {
    fn from(context: PipelineContext) -> Self {
        Self::new(context)
    }
}
