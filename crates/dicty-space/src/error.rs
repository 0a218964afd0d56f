//! Error types for lattice construction and site lookups.

use crate::site::Site;
use std::fmt;

/// Errors arising from lattice construction or site queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero sites along an axis.
    EmptySpace,
    /// A dimension exceeds the supported maximum.
    DimensionTooLarge {
        /// Which axis.
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest accepted size.
        max: u32,
    },
    /// A site lies outside the lattice.
    SiteOutOfBounds {
        /// The offending site.
        site: Site,
        /// Lattice width (x extent).
        width: u32,
        /// Lattice height (y extent).
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "lattice must have at least one site per axis"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::SiteOutOfBounds {
                site,
                width,
                height,
            } => write!(f, "site {site} outside [0, {width}) x [0, {height})"),
        }
    }
}

impl std::error::Error for SpaceError {}
