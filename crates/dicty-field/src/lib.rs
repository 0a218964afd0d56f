//! cAMP diffusion field for dicty simulations.
//!
//! [`CampField`] owns a scalar concentration grid on a [`Torus2D`] and
//! advances it by one explicit Euler step per call: second-order central
//! differences in space, periodic boundaries, first-order decay and a
//! per-site source term rebuilt by the arena at each synchronization.
//!
//! [`DiffusionParameters`] carries the spacing, decay and timestep and
//! checks them against the stability bounds of the scheme.
//!
//! [`Torus2D`]: dicty_space::Torus2D

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod params;

pub use error::FieldError;
pub use field::CampField;
pub use params::DiffusionParameters;
