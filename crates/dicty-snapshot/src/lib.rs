//! Plain-text snapshots of dicty simulations.
//!
//! A snapshot is three files sharing a prefix, conventionally
//! `{base}_{step:04}`:
//!
//! ```text
//! {prefix}.cells       one agent per line
//! {prefix}.camp        field matrix, one row (x) per line
//! {prefix}.playground  one line of run parameters
//! ```
//!
//! Roster line:
//!
//! ```text
//! id threshold release tau refractory factor state output clock x y beacon multiplier moved
//! ```
//!
//! Parameter line:
//!
//! ```text
//! base threshold release tau refractory spacing decay density width height
//! ```
//!
//! Floats use Rust's shortest round-trip formatting, so decoding and
//! re-encoding a line reproduces it exactly. Booleans are `0`/`1`.
//!
//! - [`SnapshotWriter`] writes a snapshot for an [`Arena`](dicty_engine::Arena)
//! - [`Snapshot::load`] reads one back and can rebuild the arena
//! - [`codec`] holds the per-line encoders and decoders

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod paths;
pub mod reader;
pub mod writer;

pub use codec::RunParameters;
pub use error::{DecodeError, SnapshotError};
pub use paths::SnapshotPaths;
pub use reader::{read_field, read_params, read_roster, Snapshot};
pub use writer::{write_field, write_params, write_roster, SnapshotWriter};
