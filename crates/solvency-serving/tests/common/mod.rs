//! Shared fixtures: a 95-feature model and a matching reference dataset.
//!
//! The tree flags a company as bankrupt when its standardized debt ratio
//! (feature 37) is above 1 and its standardized cash ratio (feature 80) is at
//! or below 0.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::json;

pub const N_FEATURES: usize = 95;
pub const DEBT: usize = 37;
pub const CASH: usize = 80;

pub fn feature_names() -> Vec<String> {
    (0..N_FEATURES)
        .map(|i| match i {
            DEBT => " Debt ratio %".to_string(),
            CASH => " Cash/Total Assets".to_string(),
            _ => format!(" Ratio {:02}", i),
        })
        .collect()
}

pub fn scaler_json(names: &[String]) -> serde_json::Value {
    json!({
        "type": "standard",
        "feature_names": names,
        "mean": vec![0.5; names.len()],
        "scale": vec![0.1; names.len()],
    })
}

pub fn tree_json(names: &[String]) -> serde_json::Value {
    json!({
        "type": "decision_tree",
        "feature_names": names,
        "classes": [0, 1],
        "nodes": [
            {"kind": "split", "feature": DEBT, "threshold": 1.0, "left": 1, "right": 2},
            {"kind": "leaf", "value": [120.0, 3.0]},
            {"kind": "split", "feature": CASH, "threshold": 0.0, "left": 3, "right": 4},
            {"kind": "leaf", "value": [4.0, 30.0]},
            {"kind": "leaf", "value": [15.0, 2.0]},
        ],
    })
}

/// Row values: everything at the fitted mean except the two decisive ratios.
pub fn row(debt: f64, cash: f64) -> Vec<f64> {
    let mut values = vec![0.5; N_FEATURES];
    values[DEBT] = debt;
    values[CASH] = cash;
    values
}

pub fn dataset_csv(names: &[String]) -> String {
    let mut out = String::from("Bankrupt?");
    for name in names {
        out.push(',');
        out.push_str(name);
    }
    out.push('\n');

    // healthy first, so the first bankrupt row is not row 0
    let rows: [(u8, Vec<f64>); 4] = [
        (0, row(0.3, 0.7)),
        (1, row(0.9, 0.2)),
        (0, row(0.55, 0.4)),
        (1, row(0.75, 0.35)),
    ];
    for (label, values) in rows {
        out.push_str(&label.to_string());
        for v in values {
            out.push(',');
            out.push_str(&v.to_string());
        }
        out.push('\n');
    }
    out
}

pub struct ModelDir {
    pub dir: tempfile::TempDir,
}

impl ModelDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn scaler(&self) -> PathBuf {
        self.path().join("scaler.json")
    }

    pub fn classifier(&self) -> PathBuf {
        self.path().join("decision_tree.json")
    }

    pub fn dataset(&self) -> PathBuf {
        self.path().join("data.csv")
    }
}

/// Writes scaler, tree and dataset into a fresh temp dir.
pub fn write_model_dir() -> ModelDir {
    let dir = tempfile::tempdir().unwrap();
    let names = feature_names();
    let model = ModelDir { dir };
    std::fs::write(model.scaler(), scaler_json(&names).to_string()).unwrap();
    std::fs::write(model.classifier(), tree_json(&names).to_string()).unwrap();
    std::fs::write(model.dataset(), dataset_csv(&names)).unwrap();
    model
}
