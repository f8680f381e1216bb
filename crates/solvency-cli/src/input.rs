//! Feature vector construction for the three input modes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use solvency_core::{FeatureError, FeatureSchema, FeatureVector, Label};
use solvency_data::ReferenceDataset;
use solvency_serving::ServingError;

use crate::CliResult;

/// How the feature vector is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// First bankrupt-labelled row of the dataset
    BankruptExample,
    /// First non-bankrupt-labelled row of the dataset
    HealthyExample,
    /// Dataset means, with user overrides
    Manual,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::BankruptExample => f.write_str("example company at risk of bankruptcy"),
            InputMode::HealthyExample => f.write_str("example healthy company"),
            InputMode::Manual => f.write_str("manual input"),
        }
    }
}

/// Builds the vector for `mode`.
///
/// Override names are resolved against `schema` (surrounding whitespace is
/// forgiven when unambiguous) and stored under the schema's spelling.
///
/// # Errors
///
/// Fails with [`ServingError::InvalidInput`] for an override naming an unknown
/// feature, and when the dataset has no row with the requested label.
pub fn build_features(
    mode: InputMode,
    dataset: &ReferenceDataset,
    schema: &FeatureSchema,
    overrides: &[(String, f64)],
) -> CliResult<FeatureVector> {
    let mut features = match mode {
        InputMode::BankruptExample => dataset
            .first_with_label(Label::Bankrupt)
            .context("Dataset has no bankrupt-labelled row")?,
        InputMode::HealthyExample => dataset
            .first_with_label(Label::NotBankrupt)
            .context("Dataset has no non-bankrupt-labelled row")?,
        InputMode::Manual => dataset.mean_vector(),
    };

    for (name, value) in overrides {
        let pos = schema.resolve(name).ok_or_else(|| {
            ServingError::InvalidInput(FeatureError::UnknownFeature { name: name.clone() })
        })?;
        features.set(schema.names()[pos].clone(), *value);
    }

    Ok(features)
}

/// Parses a `NAME=VALUE` flag.
///
/// Splits on the last `=`, so names may themselves contain one.
pub fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", s))?;
    if name.trim().is_empty() {
        return Err(format!("missing feature name in {:?}", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value {:?}: {}", value, e))?;
    Ok((name.to_string(), value))
}

/// Reads a JSON object mapping feature names to values.
pub fn read_overrides(path: &Path) -> CliResult<Vec<(String, f64)>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {:?}", path))?;
    let map: BTreeMap<String, f64> = serde_json::from_str(&text)
        .with_context(|| format!("Input file {:?} must be a JSON object of numbers", path))?;
    Ok(map.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_data::DEFAULT_LABEL_COLUMN;

    fn dataset() -> ReferenceDataset {
        let csv = "Bankrupt?, Debt ratio %, Cash\n0,0.2,0.8\n1,0.9,0.1\n";
        ReferenceDataset::from_reader(csv.as_bytes(), DEFAULT_LABEL_COLUMN).unwrap()
    }

    fn schema(ds: &ReferenceDataset) -> FeatureSchema {
        FeatureSchema::new(ds.feature_names().to_vec()).unwrap()
    }

    #[test]
    fn test_example_modes() {
        let ds = dataset();
        let s = schema(&ds);
        let v = build_features(InputMode::BankruptExample, &ds, &s, &[]).unwrap();
        assert_eq!(v.get(" Debt ratio %"), Some(0.9));
        let v = build_features(InputMode::HealthyExample, &ds, &s, &[]).unwrap();
        assert_eq!(v.get(" Cash"), Some(0.8));
    }

    #[test]
    fn test_manual_starts_from_means() {
        let ds = dataset();
        let s = schema(&ds);
        let overrides = vec![("Debt ratio %".to_string(), 0.7)];
        let v = build_features(InputMode::Manual, &ds, &s, &overrides).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get(" Debt ratio %"), Some(0.7));
        assert!((v.get(" Cash").unwrap() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_override_rejected() {
        let ds = dataset();
        let s = schema(&ds);
        let overrides = vec![("Quick Ratio".to_string(), 1.0)];
        let err = build_features(InputMode::Manual, &ds, &s, &overrides).unwrap_err();
        let serving = err.downcast_ref::<ServingError>().unwrap();
        assert!(serving.is_client_error());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment(" Debt ratio %=0.25").unwrap(),
            (" Debt ratio %".to_string(), 0.25)
        );
        assert_eq!(
            parse_assignment("a=b=1e-3").unwrap(),
            ("a=b".to_string(), 0.001)
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("x=abc").is_err());
    }

    #[test]
    fn test_read_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, r#"{"b": 2.0, "a": 1}"#).unwrap();
        let overrides = read_overrides(&path).unwrap();
        assert_eq!(
            overrides,
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.0)]
        );

        std::fs::write(&path, r#"{"a": "x"}"#).unwrap();
        assert!(read_overrides(&path).is_err());
    }
}
