//! The arena: agents, field, occupancy and move resolution.
//!
//! [`Arena`] owns the [`CampField`] and every [`Agent`]. It advances the
//! field one step per [`tick`](Arena::tick) and, every
//! [`sync_interval`](ArenaConfig::sync_interval) steps, runs a
//! synchronization pass:
//!
//! 1. Rebuild the occupancy map, warning about any shared site. When the
//!    registered agent leaves a shared site, the one left behind takes
//!    it over.
//! 2. Plan every agent's state update in parallel against the frozen
//!    field, then apply the plans in id order.
//! 3. Walk movable agents in id order; each takes its best free
//!    candidate site, or stays put.
//! 4. Rebuild the field's source grid from agent positions and outputs.

use std::time::Instant;

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use dicty_core::{AgentId, StepId};
use dicty_field::{CampField, FieldError};
use dicty_space::Site;

use crate::agent::{Agent, AgentState, AgentUpdate};
use crate::config::{ArenaConfig, ConfigError};
use crate::metrics::{StateCounts, SyncMetrics};

/// Two agents found on the same site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupancyViolation {
    /// The shared site.
    pub site: Site,
    /// The agent that keeps the site in the occupancy map (lower id).
    pub first: AgentId,
    /// The other agent.
    pub second: AgentId,
}

/// Agents on a diffusion field, with at most one agent per site.
#[derive(Debug)]
pub struct Arena {
    config: ArenaConfig,
    field: CampField,
    agents: Vec<Agent>,
    occupancy: IndexMap<Site, AgentId>,
    step: StepId,
}

impl Arena {
    /// Build a fresh arena from `config`.
    ///
    /// Places the permanent beacon (id 0) at the field centre, already
    /// Active with `beacon_multiplier`, then `population()` dormant agents
    /// (ids 1..=N) on distinct random agent-lattice sites drawn from a
    /// `ChaCha8Rng` seeded with `config.seed`.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = CampField::new(
            config.field_width(),
            config.field_height(),
            config.diffusion(),
        )?;
        let params = config.model.agent_parameters();
        let factor = params.lattice_factor;
        let population = config.population();

        let mut agents = Vec::with_capacity(population + 1);
        let mut occupancy = IndexMap::with_capacity(population + 1);

        let mut beacon = Agent::new(AgentId(0), params, config.beacon_site()?);
        beacon.set_output_multiplier(config.beacon_multiplier);
        beacon.make_permanent_beacon();
        beacon.activate();
        occupancy.insert(beacon.position(), beacon.id());
        agents.push(beacon);

        let (ax, ay) = config.agent_extents();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        for n in 1..=population {
            // Rejection sampling; validate() guarantees a free site exists.
            let site = loop {
                let site = Site::new(
                    rng.gen_range(0..ax) * factor,
                    rng.gen_range(0..ay) * factor,
                );
                if !occupancy.contains_key(&site) {
                    break site;
                }
            };
            let id = AgentId(n as u32);
            occupancy.insert(site, id);
            agents.push(Agent::new(id, params, site));
        }

        let mut arena = Self {
            config,
            field,
            agents,
            occupancy,
            step: StepId::default(),
        };
        arena.rebuild_sources()?;

        info!(
            agents = arena.agents.len(),
            width = arena.field.lattice().width(),
            height = arena.field.lattice().height(),
            dt = arena.field.dt(),
            seed = arena.config.seed,
            "arena initialised"
        );
        Ok(arena)
    }

    /// Rebuild an arena from imported agents and field values.
    ///
    /// Agents are sorted by id. Duplicate ids and off-lattice positions
    /// are errors; agents sharing a site are logged as occupancy
    /// violations and kept.
    pub fn restore(
        config: ArenaConfig,
        mut agents: Vec<Agent>,
        values: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        config.validate_model()?;
        let field = CampField::from_values(
            config.field_width(),
            config.field_height(),
            config.diffusion(),
            values,
        )?;

        agents.sort_by_key(Agent::id);
        if let Some(pair) = agents.windows(2).find(|w| w[0].id() == w[1].id()) {
            return Err(ConfigError::DuplicateAgentId { id: pair[0].id() });
        }
        if let Some(agent) = agents
            .iter()
            .find(|a| !field.lattice().contains(a.position()))
        {
            return Err(ConfigError::AgentOutOfBounds {
                id: agent.id(),
                site: agent.position(),
            });
        }

        let mut arena = Self {
            config,
            field,
            agents,
            occupancy: IndexMap::new(),
            step: StepId::default(),
        };
        arena.check_occupancy();
        arena.rebuild_sources()?;

        info!(
            agents = arena.agents.len(),
            width = arena.field.lattice().width(),
            height = arena.field.lattice().height(),
            dt = arena.field.dt(),
            "arena restored"
        );
        Ok(arena)
    }

    /// Configuration in force.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The diffusion field.
    pub fn field(&self) -> &CampField {
        &self.field
    }

    /// All agents, in id order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents
            .binary_search_by_key(&id, Agent::id)
            .ok()
            .map(|i| &self.agents[i])
    }

    /// The agent registered at `site`, if any.
    pub fn occupant(&self, site: Site) -> Option<AgentId> {
        self.occupancy.get(&site).copied()
    }

    /// Field steps taken so far.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Simulated time between synchronizations.
    pub fn sync_dt(&self) -> f64 {
        self.config.sync_interval as f64 * self.field.dt()
    }

    /// Agent tallies by state.
    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for agent in &self.agents {
            match agent.state() {
                AgentState::Dormant => counts.dormant += 1,
                AgentState::Active => counts.active += 1,
                AgentState::Refractory => counts.refractory += 1,
            }
        }
        counts
    }

    /// Advance the field by one explicit step.
    pub fn run_step(&mut self) {
        self.field.step();
    }

    /// One field step, then a synchronization if the step counter lands
    /// on a multiple of the sync interval.
    pub fn tick(&mut self) -> Result<Option<SyncMetrics>, FieldError> {
        self.run_step();
        self.step = self.step.next();
        if self.step.is_multiple_of(self.config.sync_interval) {
            let metrics = self.synchronize(self.sync_dt())?;
            Ok(Some(metrics))
        } else {
            Ok(None)
        }
    }

    /// Rebuild the occupancy map from agent positions.
    ///
    /// The lower id keeps a shared site. Every shared site is logged at
    /// warn level and returned.
    pub fn check_occupancy(&mut self) -> Vec<OccupancyViolation> {
        self.occupancy.clear();
        let mut violations = Vec::new();
        for agent in &self.agents {
            let site = agent.position();
            if let Some(&first) = self.occupancy.get(&site) {
                let v = OccupancyViolation {
                    site,
                    first,
                    second: agent.id(),
                };
                warn!(
                    site = %v.site,
                    first = %v.first,
                    second = %v.second,
                    "occupancy violation: agents share a site"
                );
                violations.push(v);
            } else {
                self.occupancy.insert(site, agent.id());
            }
        }
        violations
    }

    /// Update every agent against the current field, resolve moves, and
    /// rebuild the source grid. `dt` is the simulated time since the
    /// previous synchronization.
    pub fn synchronize(&mut self, dt: f64) -> Result<SyncMetrics, FieldError> {
        let start = Instant::now();
        let violations = self.check_occupancy();
        let mut metrics = SyncMetrics {
            occupancy_violations: violations.len() as u32,
            ..SyncMetrics::default()
        };

        let field = &self.field;
        let plans: Vec<AgentUpdate> = self
            .agents
            .par_iter()
            .map(|agent| agent.plan_update(field.value_at(agent.position()), dt))
            .collect();
        for (agent, plan) in self.agents.iter_mut().zip(plans) {
            match plan {
                AgentUpdate::Activate => metrics.activated += 1,
                AgentUpdate::Deactivate => metrics.deactivated += 1,
                AgentUpdate::Recover => metrics.recovered += 1,
                AgentUpdate::Idle | AgentUpdate::Advance { .. } => {}
            }
            agent.apply(plan);
        }

        for i in 0..self.agents.len() {
            let candidates = self.agents[i].propose_move(&self.field);
            if candidates.is_empty() {
                continue;
            }
            let Some(&target) = candidates
                .iter()
                .find(|site| !self.occupancy.contains_key(*site))
            else {
                metrics.moves_blocked += 1;
                continue;
            };
            let agent = &mut self.agents[i];
            let id = agent.id();
            let from = agent.position();
            if !agent.move_to(target) {
                continue;
            }
            if self.occupancy.get(&from) == Some(&id) {
                match co_occupant(&self.agents, &violations, from) {
                    Some(other) => {
                        self.occupancy.insert(from, other);
                    }
                    None => {
                        self.occupancy.swap_remove(&from);
                    }
                }
            }
            self.occupancy.insert(target, id);
            metrics.moves_committed += 1;
            trace!(agent = %id, %from, to = %target, "move committed");
        }

        self.rebuild_sources()?;

        metrics.total_us = start.elapsed().as_micros() as u64;
        debug!(
            step = %self.step,
            activated = metrics.activated,
            deactivated = metrics.deactivated,
            recovered = metrics.recovered,
            moves_committed = metrics.moves_committed,
            moves_blocked = metrics.moves_blocked,
            occupancy_violations = metrics.occupancy_violations,
            total_us = metrics.total_us,
            "synchronized"
        );
        Ok(metrics)
    }

    fn rebuild_sources(&mut self) -> Result<(), FieldError> {
        self.field.clear_sources();
        for agent in &self.agents {
            self.field.set_source(agent.position(), agent.output())?;
        }
        Ok(())
    }
}

/// An agent from `violations` that still sits on `site`.
///
/// Used when the registered occupant of a shared site moves away, so the
/// site stays taken by whoever is left behind.
fn co_occupant(
    agents: &[Agent],
    violations: &[OccupancyViolation],
    site: Site,
) -> Option<AgentId> {
    violations
        .iter()
        .filter(|v| v.site == site)
        .flat_map(|v| [v.first, v.second])
        .find(|&id| {
            agents
                .binary_search_by_key(&id, Agent::id)
                .is_ok_and(|i| agents[i].position() == site)
        })
}
