//! Error types for snapshot export and import.

use std::fmt;
use std::io;

use dicty_core::ParameterError;
use dicty_engine::ConfigError;

/// Why a single line (or a whole file's shape) failed to decode.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    /// Wrong number of whitespace-separated fields on a line.
    FieldCount {
        /// Fields the line must have.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// A field is not a valid number of the required type.
    Unparsable {
        /// Field name.
        name: &'static str,
        /// The offending text.
        text: String,
    },
    /// A float field is NaN or infinite.
    NonFinite {
        /// Field name.
        name: &'static str,
        /// The offending text.
        text: String,
    },
    /// A boolean field is neither `0` nor `1`.
    InvalidFlag {
        /// Field name.
        name: &'static str,
        /// The offending text.
        text: String,
    },
    /// A state code outside `0..=2`.
    UnknownState {
        /// The code found.
        code: u8,
    },
    /// The matrix has fewer rows than the parameters require.
    MissingRows {
        /// Rows required.
        expected: u32,
        /// Rows present.
        found: u32,
    },
    /// The matrix has more rows than the parameters require.
    ExtraRows {
        /// Rows required.
        expected: u32,
    },
    /// The parameter file has no parameter line.
    MissingLine,
    /// The parameter file has more than one line.
    ExtraLine,
    /// A roster line carries invalid agent constants.
    Parameter(ParameterError),
    /// The decoded run parameters do not describe a usable arena.
    Config(ConfigError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::Unparsable { name, text } => write!(f, "cannot parse {name} from {text:?}"),
            Self::NonFinite { name, text } => write!(f, "{name} must be finite, found {text:?}"),
            Self::InvalidFlag { name, text } => write!(f, "{name} must be 0 or 1, found {text:?}"),
            Self::UnknownState { code } => write!(f, "unknown state code {code}"),
            Self::MissingRows { expected, found } => {
                write!(f, "expected {expected} rows, found {found}")
            }
            Self::ExtraRows { expected } => write!(f, "expected {expected} rows, found more"),
            Self::MissingLine => write!(f, "missing parameter line"),
            Self::ExtraLine => write!(f, "unexpected extra line"),
            Self::Parameter(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parameter(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for DecodeError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

impl From<ConfigError> for DecodeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Errors that can occur while writing or reading a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A line could not be decoded.
    Malformed {
        /// File (or stream label) the line came from.
        file: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: DecodeError,
    },
    /// The decoded state does not form a valid arena.
    Config(ConfigError),
    /// The output base cannot be written into a parameter line.
    InvalidBase {
        /// The rejected base.
        base: String,
    },
}

impl SnapshotError {
    pub(crate) fn malformed(file: &str, line: usize, reason: impl Into<DecodeError>) -> Self {
        Self::Malformed {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { file, line, reason } => {
                write!(f, "{file}:{line}: {reason}")
            }
            Self::Config(e) => write!(f, "invalid snapshot state: {e}"),
            Self::InvalidBase { base } => {
                write!(f, "output base {base:?} must be non-empty and contain no whitespace")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed { reason, .. } => Some(reason),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
