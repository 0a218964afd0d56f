//! Spatial types for dicty simulations.
//!
//! The only topology is a two-dimensional torus: both axes wrap, so the
//! lattice has no boundary. [`Torus2D`] owns the dimensions and answers
//! index, wrap and neighbourhood queries; [`wrap`] is the single place
//! where periodic index arithmetic happens.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod site;
pub mod torus;

pub use error::SpaceError;
pub use site::Site;
pub use torus::{wrap, Neighbourhood, Torus2D, OFFSETS_8};
