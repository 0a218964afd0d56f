//! Benchmark profiles for the dicty cAMP simulation.
//!
//! Provides pre-built [`ArenaConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 arena at unit spacing (10K field sites)
//! - [`stress_profile`]: 316x316 arena (~100K field sites)
//! - [`fine_lattice_profile`]: 50x50 arena at spacing 0.5, so agents step
//!   two field sites at a time

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dicty_core::ModelParameters;
use dicty_engine::ArenaConfig;

/// Build the reference benchmark profile: 100x100 arena (10K sites).
///
/// Default constants, density 0.2 (2000 agents), sync every 10 steps.
pub fn reference_profile(seed: u64) -> ArenaConfig {
    ArenaConfig {
        output_base: "bench".to_string(),
        width: 100,
        height: 100,
        seed,
        ..ArenaConfig::default()
    }
}

/// Build a stress benchmark profile: 316x316 arena (~100K sites).
///
/// Same constants as [`reference_profile`] at 10x the site count.
pub fn stress_profile(seed: u64) -> ArenaConfig {
    ArenaConfig {
        width: 316,
        height: 316,
        ..reference_profile(seed)
    }
}

/// Build a 50x50 arena with lattice spacing 0.5 (100x100 field sites).
pub fn fine_lattice_profile(seed: u64) -> ArenaConfig {
    ArenaConfig {
        model: ModelParameters {
            lattice_spacing: 0.5,
            ..ModelParameters::default()
        },
        width: 50,
        height: 50,
        ..reference_profile(seed)
    }
}
