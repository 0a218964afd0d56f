//! Test fixtures for dicty development.
//!
//! Small builders for agents, fields and arenas that tests across the
//! workspace share. Everything here panics on invalid input; it is only
//! meant for tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    active_agent, beacon, dormant_agent, field_with, restored_arena, scenario_config,
    FieldBuilder,
};
