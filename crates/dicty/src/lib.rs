//! Dicty: a lattice simulation of cAMP signalling in *Dictyostelium*.
//!
//! A toroidal grid carries a diffusing, decaying cAMP concentration.
//! Agents sit on a (possibly coarser) lattice over it, cycle through
//! dormant, active and refractory states, release cAMP while active and
//! climb the concentration gradient while dormant. A permanent beacon at
//! the centre keeps the signal going.
//!
//! This is the facade crate that re-exports the public API of the dicty
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use dicty::prelude::*;
//!
//! let config = ArenaConfig {
//!     seed: 7,
//!     ..ArenaConfig::default()
//! };
//! let arena = Arena::new(config).unwrap();
//! assert_eq!(arena.agents().len(), 1 + 20);
//!
//! let mut sim = Simulation::new(arena, SimulationConfig { max_steps: 30, sampling: 10 }).unwrap();
//! let mut steps = Vec::new();
//! let summary = sim
//!     .run(|step, arena| {
//!         steps.push(step);
//!         assert_eq!(arena.state_counts().total(), 21);
//!         Ok::<(), FieldError>(())
//!     })
//!     .unwrap();
//! assert_eq!(steps, vec![StepId(0), StepId(10), StepId(20), StepId(30)]);
//! assert_eq!(summary.syncs, 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dicty-core` | IDs, model parameters, parameter errors |
//! | [`space`] | `dicty-space` | Sites, the wrapped torus, neighbourhoods |
//! | [`field`] | `dicty-field` | The cAMP field and its diffusion step |
//! | [`engine`] | `dicty-engine` | Agents, the arena, move resolution, run driver |
//! | [`snapshot`] | `dicty-snapshot` | Plain-text snapshot export and import |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and model parameters (`dicty-core`).
pub use dicty_core as types;

/// Toroidal lattice geometry (`dicty-space`).
///
/// [`space::Torus2D`] wraps coordinates and enumerates the eight-site
/// [`space::Neighbourhood`] at a given step.
pub use dicty_space as space;

/// The cAMP concentration field (`dicty-field`).
///
/// [`field::CampField`] holds the grid, its sources and the explicit
/// diffusion step.
pub use dicty_field as field;

/// Agents and the arena that drives them (`dicty-engine`).
///
/// [`engine::Arena`] owns the field and the agents; [`engine::Simulation`]
/// runs it on a fixed schedule.
pub use dicty_engine as engine;

/// Snapshot files (`dicty-snapshot`).
///
/// Write runs with [`snapshot::SnapshotWriter`], read them back with
/// [`snapshot::Snapshot::load`].
pub use dicty_snapshot as snapshot;

/// Common imports for typical dicty usage.
///
/// ```rust
/// use dicty::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use dicty_core::{AgentId, AgentParameters, ModelParameters, StepId};

    // Errors
    pub use dicty_core::ParameterError;
    pub use dicty_engine::ConfigError;
    pub use dicty_field::FieldError;
    pub use dicty_snapshot::SnapshotError;

    // Space
    pub use dicty_space::{Site, Torus2D};

    // Field
    pub use dicty_field::{CampField, DiffusionParameters};

    // Engine
    pub use dicty_engine::{
        Agent, AgentState, Arena, ArenaConfig, RunSummary, Simulation, SimulationConfig,
        StateCounts, SyncMetrics,
    };

    // Snapshots
    pub use dicty_snapshot::{Snapshot, SnapshotWriter};
}
