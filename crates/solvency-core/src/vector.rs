//! Named feature vectors.

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::schema::FeatureSchema;

/// An ordered mapping from feature name to raw value.
///
/// Insertion order is preserved for display, but nothing downstream depends on
/// it: the pipeline resolves every entry by name through a [`FeatureSchema`].
///
/// # Examples
///
/// ```
/// use solvency_core::FeatureVector;
///
/// let mut v = FeatureVector::from_pairs([("a", 1.0), ("b", 2.0)]);
/// v.set("a", 5.0);
/// assert_eq!(v.get("a"), Some(5.0));
/// assert_eq!(v.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vector from `(name, value)` pairs, keeping their order.
    ///
    /// Repeated names are kept as-is so that alignment can report them.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Pairs positional values with the schema's names.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::DimensionMismatch`] if `values` does not have
    /// exactly one entry per schema feature.
    pub fn from_values(schema: &FeatureSchema, values: &[f64]) -> Result<Self> {
        if values.len() != schema.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        Ok(Self::from_pairs(
            schema
                .names()
                .iter()
                .cloned()
                .zip(values.iter().copied()),
        ))
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Sets `name` to `value`, overwriting in place or appending.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Iterates names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
