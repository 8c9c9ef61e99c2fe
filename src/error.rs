//! Error types for network construction, training setup and configuration.
//!
//! Shape violations inside the numeric kernels (`dot_into`, `copy_from`, the
//! gradient estimators) are caller bugs and panic at the call site. Only the
//! surfaces a driver can reasonably recover from return these errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// The layer widths cannot describe a network.
    #[error("Invalid model {widths:?}: {reason}")]
    InvalidModel { widths: Vec<usize>, reason: String },

    /// Training data does not line up with the network's input/output layers.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A training batch without rows has no mean cost or gradient.
    #[error("Training batch is empty")]
    EmptyBatch,

    /// A matrix buffer could not be obtained.
    #[error("Failed to allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    /// Unknown gradient method name.
    #[error("Unknown gradient method '{0}' (expected 'b' or 'f')")]
    InvalidMethod(String),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub fn invalid_model<S: Into<String>>(widths: &[usize], reason: S) -> Self {
        Self::InvalidModel {
            widths: widths.to_vec(),
            reason: reason.into(),
        }
    }

    pub fn dimension_mismatch<S: Into<String>>(context: S, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
