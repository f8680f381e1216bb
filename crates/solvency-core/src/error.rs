//! Error types for the solvency-core crate.
//!
//! Every variant describes a way a feature vector (or the schema it is checked
//! against) can fail to line up with the fitted feature order.

use thiserror::Error;

/// Errors raised while building or aligning feature data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// The vector does not carry the number of features the schema expects.
    #[error("Invalid feature dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Number of features in the schema.
        expected: usize,
        /// Number of features supplied.
        actual: usize,
    },

    /// A feature required by the schema is absent from the vector.
    #[error("Missing feature: {name:?}")]
    MissingFeature {
        /// Name of the missing feature.
        name: String,
    },

    /// The vector names a feature the schema does not know.
    #[error("Unknown feature: {name:?}")]
    UnknownFeature {
        /// Name of the unrecognised feature.
        name: String,
    },

    /// A feature name appears more than once.
    #[error("Duplicate feature: {name:?}")]
    DuplicateFeature {
        /// Name that was repeated.
        name: String,
    },

    /// A value is NaN or infinite.
    #[error("Non-finite value for feature {name:?}: {value}")]
    NonFiniteValue {
        /// Feature holding the bad value.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// A schema was built with no feature names at all.
    #[error("Feature schema must contain at least one feature")]
    EmptySchema,

    /// A feature name is the empty string.
    #[error("Feature name at position {position} is empty")]
    EmptyName {
        /// Index of the empty name.
        position: usize,
    },
}

/// A specialized Result type for solvency-core operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeatureError::DimensionMismatch {
            expected: 95,
            actual: 94,
        };
        assert_eq!(
            err.to_string(),
            "Invalid feature dimension: expected 95, got 94"
        );

        let err = FeatureError::MissingFeature {
            name: "Cash Flow Per Share".to_string(),
        };
        assert_eq!(err.to_string(), "Missing feature: \"Cash Flow Per Share\"");

        let err = FeatureError::EmptyName { position: 3 };
        assert_eq!(err.to_string(), "Feature name at position 3 is empty");
    }
}
