//! Binary prediction labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a prediction.
///
/// Encoded as `1` for bankrupt and `0` for not bankrupt, matching the dataset's
/// `Bankrupt?` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    /// Predicted not bankrupt (`0`).
    NotBankrupt,
    /// Predicted bankrupt (`1`).
    Bankrupt,
}

/// The pipeline's public result type.
pub type PredictionResult = Label;

impl Label {
    /// Numeric encoding.
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            Label::NotBankrupt => 0,
            Label::Bankrupt => 1,
        }
    }

    /// Whether this is [`Label::Bankrupt`].
    #[inline]
    pub fn is_bankrupt(self) -> bool {
        self == Label::Bankrupt
    }

    /// Human-readable verdict.
    pub fn describe(self) -> &'static str {
        match self {
            Label::Bankrupt => "Company is predicted to be AT RISK OF BANKRUPTCY",
            Label::NotBankrupt => "Company is predicted NOT to go bankrupt",
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = InvalidLabel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::NotBankrupt),
            1 => Ok(Label::Bankrupt),
            other => Err(InvalidLabel(other as i64)),
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = InvalidLabel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidLabel(value))
            .and_then(<Label as TryFrom<u8>>::try_from)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Bankrupt => f.write_str("bankrupt"),
            Label::NotBankrupt => f.write_str("not bankrupt"),
        }
    }
}

/// A class value outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Label must be 0 or 1, got {0}")]
pub struct InvalidLabel(pub i64);
