//! Fixed-length run driver.
//!
//! [`Simulation`] wraps an [`Arena`] and a [`SimulationConfig`] and runs
//! the arena for `max_steps` ticks, handing the arena to an observer at
//! step 0 and every `sampling` steps after that. The observer decides
//! what to do with each sample (write a snapshot, collect statistics);
//! the engine itself does no I/O.
//!
//! # Example
//!
//! ```
//! use dicty_engine::{Arena, ArenaConfig, Simulation, SimulationConfig};
//! use dicty_field::FieldError;
//!
//! let arena = Arena::new(ArenaConfig::default()).unwrap();
//! let mut sim = Simulation::new(arena, SimulationConfig { max_steps: 20, sampling: 10 }).unwrap();
//! let mut samples = Vec::new();
//! sim.run(|step, _arena| {
//!     samples.push(step.0);
//!     Ok::<(), FieldError>(())
//! })
//! .unwrap();
//! assert_eq!(samples, vec![0, 10, 20]);
//! ```

use dicty_core::StepId;
use dicty_field::FieldError;

use crate::arena::Arena;
use crate::config::{ConfigError, SimulationConfig};

/// Totals for a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Field steps taken.
    pub steps: u64,
    /// Observer invocations, including step 0.
    pub samples: u64,
    /// Synchronization passes.
    pub syncs: u64,
    /// Moves committed across all synchronizations.
    pub moves_committed: u64,
    /// Occupancy violations seen across all synchronizations.
    pub occupancy_violations: u64,
}

/// An arena plus the schedule to run it on.
#[derive(Debug)]
pub struct Simulation {
    arena: Arena,
    config: SimulationConfig,
}

impl Simulation {
    /// Pair an arena with a run schedule.
    pub fn new(arena: Arena, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { arena, config })
    }

    /// The arena being driven.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The run schedule.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Give the arena back.
    pub fn into_arena(self) -> Arena {
        self.arena
    }

    /// Run `max_steps` ticks.
    ///
    /// `observer` is called with step 0 before the first tick and then
    /// after every tick whose step is a multiple of `sampling`. The first
    /// observer error stops the run and is returned.
    pub fn run<F, E>(&mut self, mut observer: F) -> Result<RunSummary, E>
    where
        F: FnMut(StepId, &Arena) -> Result<(), E>,
        E: From<FieldError>,
    {
        let mut summary = RunSummary::default();
        observer(self.arena.step(), &self.arena)?;
        summary.samples += 1;

        for _ in 0..self.config.max_steps {
            if let Some(metrics) = self.arena.tick()? {
                summary.syncs += 1;
                summary.moves_committed += u64::from(metrics.moves_committed);
                summary.occupancy_violations += u64::from(metrics.occupancy_violations);
            }
            summary.steps += 1;
            let step = self.arena.step();
            if step.0 % self.config.sampling == 0 {
                observer(step, &self.arena)?;
                summary.samples += 1;
            }
        }
        Ok(summary)
    }
}
