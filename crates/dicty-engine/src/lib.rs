//! Agents, arena and run driver for dicty simulations.
//!
//! - [`Agent`] is a single cell: a Dormant/Active/Refractory state machine
//!   that releases cAMP while Active and climbs the concentration gradient
//!   at most once per excitation.
//! - [`Arena`] owns the agents and the [`CampField`](dicty_field::CampField),
//!   keeps at most one agent per site, and resolves competing moves in id
//!   order.
//! - [`Simulation`] runs an arena for a fixed number of steps and hands
//!   periodic samples to an observer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod arena;
pub mod config;
pub mod metrics;
pub mod simulation;

pub use agent::{Agent, AgentRecord, AgentState, AgentUpdate, MOVE_MARGIN};
pub use arena::{Arena, OccupancyViolation};
pub use config::{ArenaConfig, ConfigError, SimulationConfig};
pub use metrics::{StateCounts, SyncMetrics};
pub use simulation::{RunSummary, Simulation};
