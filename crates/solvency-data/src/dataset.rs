//! The labelled reference dataset.
//!
//! The dataset is only used to pre-fill inputs: it provides one example row
//! per label and the per-feature population mean. It plays no part in the
//! inference contract itself.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use solvency_core::{FeatureVector, Label};
use tracing::{debug, info};

use crate::csv::split_record;
use crate::error::{DataError, DataResult};

/// Default name of the label column.
pub const DEFAULT_LABEL_COLUMN: &str = "Bankrupt?";

/// In-memory copy of the reference CSV.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    feature_names: Vec<String>,
    label_column: String,
    rows: Vec<Vec<f64>>,
    labels: Vec<Label>,
}

impl ReferenceDataset {
    /// Reads a CSV file whose header names the label column and the features.
    ///
    /// The label column may sit anywhere in the header; every other column is a
    /// feature, kept in header order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the file cannot be read, and parse errors
    /// for a missing header, missing label column, malformed rows or labels
    /// outside `{0, 1}`.
    pub fn open(path: impl AsRef<Path>, label_column: &str) -> DataResult<Self> {
        let path = path.as_ref();
        info!("Loading reference dataset from: {:?}", path);

        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(BufReader::new(file), label_column).map_err(|e| match e {
            DataError::Io { source, .. } => DataError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            "Loaded {} rows with {} features",
            dataset.len(),
            dataset.feature_names.len()
        );
        Ok(dataset)
    }

    /// Parses CSV text from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, label_column: &str) -> DataResult<Self> {
        let mut lines = reader.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((idx, line)) => {
                    let line = line.map_err(|source| DataError::Io {
                        path: Default::default(),
                        source,
                    })?;
                    let line = line.trim_start_matches('\u{feff}');
                    if !line.trim().is_empty() {
                        break split_record(line.trim_end_matches('\r'))
                            .map_err(|m| DataError::parse(idx + 1, m))?;
                    }
                }
                None => return Err(DataError::MissingHeader),
            }
        };

        let label_idx = header
            .iter()
            .position(|h| h == label_column)
            .or_else(|| header.iter().position(|h| h.trim() == label_column.trim()))
            .ok_or_else(|| DataError::MissingLabelColumn {
                column: label_column.to_string(),
            })?;

        let feature_names: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, h)| h.clone())
            .collect();
        debug!("Dataset header: {} feature columns", feature_names.len());

        let mut rows = Vec::new();
        let mut labels = Vec::new();

        for (idx, line) in lines {
            let line_no = idx + 1;
            let line = line.map_err(|source| DataError::Io {
                path: Default::default(),
                source,
            })?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_record(line).map_err(|m| DataError::parse(line_no, m))?;
            if fields.len() != header.len() {
                return Err(DataError::parse(
                    line_no,
                    format!("expected {} fields, found {}", header.len(), fields.len()),
                ));
            }

            let label = parse_label(&fields[label_idx]).ok_or_else(|| DataError::InvalidLabel {
                line: line_no,
                value: fields[label_idx].clone(),
            })?;

            let mut row = Vec::with_capacity(feature_names.len());
            for (i, field) in fields.iter().enumerate() {
                if i == label_idx {
                    continue;
                }
                let value: f64 = field.trim().parse().map_err(|e| {
                    DataError::parse(line_no, format!("invalid value {:?} in column {}: {}", field, i, e))
                })?;
                if !value.is_finite() {
                    return Err(DataError::parse(
                        line_no,
                        format!("non-finite value {:?} in column {}", field, i),
                    ));
                }
                row.push(value);
            }

            rows.push(row);
            labels.push(label);
        }

        if rows.is_empty() {
            return Err(DataError::NoRows);
        }

        Ok(Self {
            feature_names,
            label_column: header[label_idx].clone(),
            rows,
            labels,
        })
    }

    /// Feature names in header order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Name of the label column as written in the header.
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a successfully loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows with their labels.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], Label)> + '_ {
        self.rows
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter().copied())
    }

    /// Count of rows carrying `label`.
    pub fn count_label(&self, label: Label) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// Arithmetic mean of every feature column.
    pub fn mean_values(&self) -> Vec<f64> {
        let n = self.rows.len() as f64;
        let mut sums = vec![0.0; self.feature_names.len()];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Per-feature means as a named vector.
    pub fn mean_vector(&self) -> FeatureVector {
        self.named(&self.mean_values())
    }

    /// The row at `index` as a named vector.
    pub fn row_vector(&self, index: usize) -> Option<FeatureVector> {
        self.rows.get(index).map(|row| self.named(row))
    }

    /// The first row labelled `label`.
    pub fn first_with_label(&self, label: Label) -> Option<FeatureVector> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .and_then(|idx| self.row_vector(idx))
    }

    fn named(&self, values: &[f64]) -> FeatureVector {
        FeatureVector::from_pairs(
            self.feature_names
                .iter()
                .cloned()
                .zip(values.iter().copied()),
        )
    }
}

fn parse_label(field: &str) -> Option<Label> {
    let field = field.trim();
    let value = match field.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f: f64 = field.parse().ok()?;
            if f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };
    Label::try_from(value).ok()
}
