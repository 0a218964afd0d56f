//! Core types for the dicty cAMP signalling simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and the immutable model parameter set shared by the
//! field solver, the agents and the arena.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod params;

pub use error::ParameterError;
pub use id::{AgentId, StepId};
pub use params::{AgentParameters, ModelParameters};
