//! Errors raised while building or mutating a [`CampField`](crate::CampField).

use dicty_core::ParameterError;
use dicty_space::SpaceError;
use std::error::Error;
use std::fmt;

/// Errors from field construction, import and source updates.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A diffusion parameter is out of range.
    Parameter(ParameterError),
    /// The lattice could not be built, or a site is off-lattice.
    Space(SpaceError),
    /// The explicit timestep violates a stability bound.
    UnstableTimestep {
        /// The requested timestep.
        dt: f64,
        /// The largest timestep that keeps the scheme stable and positive.
        max: f64,
    },
    /// An imported value buffer does not match the lattice.
    ShapeMismatch {
        /// Number of sites on the lattice.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// An imported value is negative or not finite.
    InvalidValue {
        /// Flat index of the offending value.
        index: usize,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(e) => write!(f, "invalid diffusion parameter: {e}"),
            Self::Space(e) => write!(f, "lattice error: {e}"),
            Self::UnstableTimestep { dt, max } => {
                write!(f, "timestep {dt} exceeds stability bound {max}")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "expected {expected} field values, got {actual}")
            }
            Self::InvalidValue { index, value } => {
                write!(f, "field value {value} at index {index} is not a finite non-negative number")
            }
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameter(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for FieldError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

impl From<SpaceError> for FieldError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
