//! Error types for model parameter validation.

use std::error::Error;
use std::fmt;

/// A model parameter failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterError {
    /// The value is NaN or infinite.
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must be strictly positive.
    NotPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must be zero or positive.
    Negative {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::NotPositive { name, value } => {
                write!(f, "{name} must be > 0, got {value}")
            }
            Self::Negative { name, value } => {
                write!(f, "{name} must be >= 0, got {value}")
            }
        }
    }
}

impl Error for ParameterError {}

/// Check that `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ParameterError::NotPositive { name, value });
    }
    Ok(value)
}

/// Check that `value` is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative { name, value });
    }
    Ok(value)
}
