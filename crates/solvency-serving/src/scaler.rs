//! Fitted feature scalers.
//!
//! A scaler artifact is a per-feature affine transform fitted offline. Two
//! families are supported, tagged by `"type"` in the artifact file:
//!
//! - `standard`: `(x - mean) / scale`, where either part may be omitted.
//! - `min_max`: `x * scale + min`.
//!
//! Both carry the feature names they were fitted with. Construction validates
//! lengths and finiteness, so [`ScalerArtifact::transform`] cannot fail on a
//! vector of the right length.

use serde::{Deserialize, Serialize};

use crate::error::{ServingError, ServingResult};

/// A fitted scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// Standardization (centering and unit variance).
    Standard(StandardScaler),
    /// Rescaling into a fixed range.
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Feature names in fitted order.
    pub fn feature_names(&self) -> &[String] {
        match self {
            ScalerArtifact::Standard(s) => &s.feature_names,
            ScalerArtifact::MinMax(s) => &s.feature_names,
        }
    }

    /// Short name of the scaler family.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalerArtifact::Standard(_) => "standard",
            ScalerArtifact::MinMax(_) => "min_max",
        }
    }

    /// Scales `values` in place.
    ///
    /// `values` must be in fitted order and have one entry per feature; the
    /// pipeline guarantees both before calling.
    pub fn transform_in_place(&self, values: &mut [f64]) {
        debug_assert_eq!(values.len(), self.feature_names().len());
        match self {
            ScalerArtifact::Standard(s) => s.transform_in_place(values),
            ScalerArtifact::MinMax(s) => s.transform_in_place(values),
        }
    }

    /// Returns a scaled copy of `values`.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        let mut out = values.to_vec();
        self.transform_in_place(&mut out);
        out
    }
}

/// Standardizes each feature as `(x - mean) / scale`.
///
/// A zero `scale` entry (a constant feature during fitting) is treated as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StandardScalerSpec", into = "StandardScalerSpec")]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: Option<Vec<f64>>,
    scale: Option<Vec<f64>>,
}

/// On-disk form of [`StandardScaler`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScalerSpec {
    /// Feature names in fitted order.
    pub feature_names: Vec<String>,
    /// Per-feature mean, or `null` when fitted without centering.
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// Per-feature scale, or `null` when fitted without scaling.
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    /// Builds a validated scaler.
    pub fn new(
        feature_names: Vec<String>,
        mean: Option<Vec<f64>>,
        scale: Option<Vec<f64>>,
    ) -> ServingResult<Self> {
        let n = feature_names.len();
        if n == 0 {
            return Err(ServingError::artifact_load("scaler has no features"));
        }
        if let Some(mean) = &mean {
            check_params("mean", mean, n)?;
        }
        if let Some(scale) = &scale {
            check_params("scale", scale, n)?;
        }
        Ok(Self {
            feature_names,
            mean,
            scale,
        })
    }

    fn transform_in_place(&self, values: &mut [f64]) {
        if let Some(mean) = &self.mean {
            for (v, m) in values.iter_mut().zip(mean) {
                *v -= m;
            }
        }
        if let Some(scale) = &self.scale {
            for (v, &s) in values.iter_mut().zip(scale) {
                *v /= if s == 0.0 { 1.0 } else { s };
            }
        }
    }
}

impl TryFrom<StandardScalerSpec> for StandardScaler {
    type Error = ServingError;

    fn try_from(spec: StandardScalerSpec) -> ServingResult<Self> {
        Self::new(spec.feature_names, spec.mean, spec.scale)
    }
}

impl From<StandardScaler> for StandardScalerSpec {
    fn from(s: StandardScaler) -> Self {
        Self {
            feature_names: s.feature_names,
            mean: s.mean,
            scale: s.scale,
        }
    }
}

/// Rescales each feature as `x * scale + min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinMaxScalerSpec", into = "MinMaxScalerSpec")]
pub struct MinMaxScaler {
    feature_names: Vec<String>,
    min: Vec<f64>,
    scale: Vec<f64>,
}

/// On-disk form of [`MinMaxScaler`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScalerSpec {
    /// Feature names in fitted order.
    pub feature_names: Vec<String>,
    /// Per-feature additive offset.
    pub min: Vec<f64>,
    /// Per-feature multiplier.
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    /// Builds a validated scaler.
    pub fn new(feature_names: Vec<String>, min: Vec<f64>, scale: Vec<f64>) -> ServingResult<Self> {
        let n = feature_names.len();
        if n == 0 {
            return Err(ServingError::artifact_load("scaler has no features"));
        }
        check_params("min", &min, n)?;
        check_params("scale", &scale, n)?;
        Ok(Self {
            feature_names,
            min,
            scale,
        })
    }

    fn transform_in_place(&self, values: &mut [f64]) {
        for ((v, s), m) in values.iter_mut().zip(&self.scale).zip(&self.min) {
            *v = *v * s + m;
        }
    }
}

impl TryFrom<MinMaxScalerSpec> for MinMaxScaler {
    type Error = ServingError;

    fn try_from(spec: MinMaxScalerSpec) -> ServingResult<Self> {
        Self::new(spec.feature_names, spec.min, spec.scale)
    }
}

impl From<MinMaxScaler> for MinMaxScalerSpec {
    fn from(s: MinMaxScaler) -> Self {
        Self {
            feature_names: s.feature_names,
            min: s.min,
            scale: s.scale,
        }
    }
}

fn check_params(what: &str, params: &[f64], expected: usize) -> ServingResult<()> {
    if params.len() != expected {
        return Err(ServingError::artifact_load(format!(
            "scaler {} has len {}, expected {}",
            what,
            params.len(),
            expected
        )));
    }
    if let Some(pos) = params.iter().position(|p| !p.is_finite()) {
        return Err(ServingError::artifact_load(format!(
            "scaler {} has non-finite entry at index {}",
            what, pos
        )));
    }
    Ok(())
}
