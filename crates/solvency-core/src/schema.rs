//! The pinned, ordered feature schema.
//!
//! A [`FeatureSchema`] records the exact feature order the scaler and the
//! classifier were fitted with. Feature vectors are resolved against it by
//! name, so callers never have to reproduce column order themselves.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::group::FeatureGroup;
use crate::vector::FeatureVector;

/// Ordered list of unique feature names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Builds a schema from names in fitted order.
    ///
    /// # Errors
    ///
    /// Fails with [`FeatureError::EmptySchema`] for an empty list,
    /// [`FeatureError::EmptyName`] for a blank name and
    /// [`FeatureError::DuplicateFeature`] when a name repeats.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(FeatureError::EmptySchema);
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(FeatureError::EmptyName { position });
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(FeatureError::DuplicateFeature { name: name.clone() });
            }
        }

        Ok(Self { names, index })
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; a schema cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in fitted order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of an exact name.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Resolves a user-supplied name to its position.
    ///
    /// Exact matches win. Otherwise surrounding whitespace is ignored on both
    /// sides, and the lookup only succeeds if exactly one feature matches.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        if let Some(pos) = self.position(name) {
            return Some(pos);
        }
        let wanted = name.trim();
        let mut hits = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, n)| n.trim() == wanted)
            .map(|(i, _)| i);
        match (hits.next(), hits.next()) {
            (Some(pos), None) => Some(pos),
            _ => None,
        }
    }

    /// Whether `other` names the same features in the same order.
    pub fn same_order(&self, other: &[String]) -> bool {
        self.names.as_slice() == other
    }

    /// Resolves `vector` by name into fitted order.
    ///
    /// Entry order in `vector` is irrelevant. Every schema feature must appear
    /// exactly once, no unknown names are allowed, and all values must be
    /// finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use solvency_core::{FeatureSchema, FeatureVector};
    ///
    /// let schema = FeatureSchema::new(vec!["a".into(), "b".into()]).unwrap();
    /// let v = FeatureVector::from_pairs([("b", 2.0), ("a", 1.0)]);
    /// assert_eq!(schema.align(&v).unwrap(), vec![1.0, 2.0]);
    /// ```
    pub fn align(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        let mut slots: Vec<Option<f64>> = vec![None; self.len()];

        for (name, value) in vector.iter() {
            let pos = self
                .position(name)
                .ok_or_else(|| FeatureError::UnknownFeature {
                    name: name.to_string(),
                })?;
            if slots[pos].is_some() {
                return Err(FeatureError::DuplicateFeature {
                    name: name.to_string(),
                });
            }
            if !value.is_finite() {
                return Err(FeatureError::NonFiniteValue {
                    name: name.to_string(),
                    value,
                });
            }
            slots[pos] = Some(value);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(pos, slot)| {
                slot.ok_or_else(|| FeatureError::MissingFeature {
                    name: self.names[pos].clone(),
                })
            })
            .collect()
    }

    /// Checks a positional vector: length and finiteness only.
    pub fn check_values(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }
        if let Some((pos, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FeatureError::NonFiniteValue {
                name: self.names[pos].clone(),
                value,
            });
        }
        Ok(())
    }

    /// Display groups clamped to this schema.
    pub fn groups(&self) -> Vec<FeatureGroup> {
        FeatureGroup::standard()
            .into_iter()
            .filter_map(|g| g.clamp(self.len()))
            .collect()
    }

    /// Names belonging to `group`.
    pub fn group_names<'a>(&'a self, group: &FeatureGroup) -> &'a [String] {
        let range = group.range();
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.names[start..end]
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = FeatureError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}
