use std::error::Error;
use std::fmt;

/// Error taxonomy for the training and inference pipelines.
///
/// Training-time failures (`Schema`, `InsufficientData`, `Config`) abort the
/// run; inference-time failures (`InvalidFeature`, `ModelUnavailable`) are
/// per-request values the caller translates into client/server faults.
#[derive(Debug, Clone, PartialEq)]
pub enum CropError {
    /// Malformed training data: wrong feature arity or a non-finite value.
    Schema(String),
    /// A label lacks enough samples to appear in both split partitions.
    InsufficientData(String),
    /// Malformed inference input.
    InvalidFeature(String),
    /// No fitted model has been installed or restored.
    ModelUnavailable,
    /// Rejected hyper-parameter or split fraction.
    Config(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CropError::Schema(detail) => write!(f, "malformed training data: {}", detail),
            CropError::InsufficientData(detail) => write!(f, "cannot stratify dataset: {}", detail),
            CropError::InvalidFeature(detail) => write!(f, "invalid feature input: {}", detail),
            CropError::ModelUnavailable => write!(f, "no fitted model is available"),
            CropError::Config(detail) => write!(f, "invalid configuration: {}", detail),
        }
    }
}

impl Error for CropError {}
