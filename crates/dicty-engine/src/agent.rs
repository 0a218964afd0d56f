//! A single cell and its excitation state machine.
//!
//! Each [`Agent`] cycles Dormant → Active → Refractory → Dormant. While
//! Active it releases cAMP at `multiplier · release_amount / τ` and may
//! take one step up the local concentration gradient.
//!
//! The state update is split in two so the arena can fan it out across
//! threads: [`Agent::plan_update`] reads only the agent and a field value
//! and returns an [`AgentUpdate`]; [`Agent::apply`] writes it back.

use std::fmt;

use dicty_core::error::require_positive;
use dicty_core::{AgentId, AgentParameters, ParameterError};
use dicty_field::CampField;
use dicty_space::{Neighbourhood, Site};

/// Minimum concentration gain that makes a neighbour worth moving to.
pub const MOVE_MARGIN: f64 = 5e-4;

// ── AgentState ─────────────────────────────────────────────────────

/// Excitation state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentState {
    /// Waiting for the local concentration to cross the threshold.
    Dormant,
    /// Releasing cAMP.
    Active,
    /// Recovering; insensitive to cAMP.
    Refractory,
}

impl AgentState {
    /// Persisted integer code: 0, 1, 2.
    pub fn code(self) -> u8 {
        match self {
            Self::Dormant => 0,
            Self::Active => 1,
            Self::Refractory => 2,
        }
    }

    /// Inverse of [`code`](Self::code). `None` for unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Dormant),
            1 => Some(Self::Active),
            2 => Some(Self::Refractory),
            _ => None,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dormant => "dormant",
            Self::Active => "active",
            Self::Refractory => "refractory",
        };
        f.write_str(name)
    }
}

// ── AgentUpdate ────────────────────────────────────────────────────

/// The outcome of one synchronization for one agent, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentUpdate {
    /// Dormant and below threshold: nothing changes.
    Idle,
    /// Clock advanced, state unchanged.
    Advance {
        /// The new clock value.
        clock: f64,
    },
    /// Dormant → Active.
    Activate,
    /// Active → Refractory.
    Deactivate,
    /// Refractory → Dormant.
    Recover,
}

// ── AgentRecord ────────────────────────────────────────────────────

/// Every persisted attribute of an agent, as plain fields.
///
/// Field order matches the roster line layout.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRecord {
    /// Agent id.
    pub id: AgentId,
    /// Excitation threshold.
    pub excitation_threshold: f64,
    /// Release per excitation.
    pub release_amount: f64,
    /// Excited duration `τ`.
    pub excited_duration: f64,
    /// Refractory duration.
    pub refractory_duration: f64,
    /// Field sites per agent step.
    pub lattice_factor: u32,
    /// Current state.
    pub state: AgentState,
    /// Current release rate.
    pub output: f64,
    /// Time since the last transition.
    pub clock: f64,
    /// Position.
    pub position: Site,
    /// Never leaves Active, never moves.
    pub permanent_beacon: bool,
    /// Release rate multiplier.
    pub output_multiplier: f64,
    /// Has already moved during the current excitation.
    pub moved_this_cycle: bool,
}

// ── Agent ──────────────────────────────────────────────────────────

/// One cell on the lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    id: AgentId,
    params: AgentParameters,
    state: AgentState,
    clock: f64,
    output: f64,
    position: Site,
    permanent_beacon: bool,
    output_multiplier: f64,
    moved_this_cycle: bool,
}

impl Agent {
    /// A dormant agent with multiplier 1 at `position`.
    pub fn new(id: AgentId, params: AgentParameters, position: Site) -> Self {
        Self {
            id,
            params,
            state: AgentState::Dormant,
            clock: 0.0,
            output: 0.0,
            position,
            permanent_beacon: false,
            output_multiplier: 1.0,
            moved_this_cycle: false,
        }
    }

    /// Rebuild an agent from a persisted record.
    ///
    /// The per-agent constants and the multiplier are validated; state,
    /// clock and output are taken as recorded.
    pub fn from_record(record: &AgentRecord) -> Result<Self, ParameterError> {
        let params = AgentParameters {
            excitation_threshold: record.excitation_threshold,
            release_amount: record.release_amount,
            excited_duration: record.excited_duration,
            refractory_duration: record.refractory_duration,
            lattice_factor: record.lattice_factor,
        };
        params.validate()?;
        require_positive("output_multiplier", record.output_multiplier)?;
        Ok(Self {
            id: record.id,
            params,
            state: record.state,
            clock: record.clock,
            output: record.output,
            position: record.position,
            permanent_beacon: record.permanent_beacon,
            output_multiplier: record.output_multiplier,
            moved_this_cycle: record.moved_this_cycle,
        })
    }

    /// Every persisted attribute.
    pub fn to_record(&self) -> AgentRecord {
        AgentRecord {
            id: self.id,
            excitation_threshold: self.params.excitation_threshold,
            release_amount: self.params.release_amount,
            excited_duration: self.params.excited_duration,
            refractory_duration: self.params.refractory_duration,
            lattice_factor: self.params.lattice_factor,
            state: self.state,
            output: self.output,
            clock: self.clock,
            position: self.position,
            permanent_beacon: self.permanent_beacon,
            output_multiplier: self.output_multiplier,
            moved_this_cycle: self.moved_this_cycle,
        }
    }

    /// Agent id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Per-agent constants.
    pub fn params(&self) -> &AgentParameters {
        &self.params
    }

    /// Current state.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Time since the last transition.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Current release rate.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Current position.
    pub fn position(&self) -> Site {
        self.position
    }

    /// Whether this agent is the permanent beacon.
    pub fn is_permanent_beacon(&self) -> bool {
        self.permanent_beacon
    }

    /// Release rate multiplier.
    pub fn output_multiplier(&self) -> f64 {
        self.output_multiplier
    }

    /// Whether the agent has moved during its current excitation.
    pub fn moved_this_cycle(&self) -> bool {
        self.moved_this_cycle
    }

    /// Set the release rate multiplier. Takes effect on the next activation.
    pub fn set_output_multiplier(&mut self, multiplier: f64) {
        self.output_multiplier = multiplier;
    }

    /// Irreversibly pin the agent in the Active state and in place.
    pub fn make_permanent_beacon(&mut self) {
        self.permanent_beacon = true;
    }

    /// Enter the Active state immediately.
    pub fn activate(&mut self) {
        self.state = AgentState::Active;
        self.clock = 0.0;
        self.output = self.output_multiplier * self.params.release_rate();
        self.moved_this_cycle = false;
    }

    fn deactivate(&mut self) {
        self.state = AgentState::Refractory;
        self.clock = 0.0;
        self.output = 0.0;
    }

    fn recover(&mut self) {
        self.state = AgentState::Dormant;
        self.clock = 0.0;
    }

    /// Decide what one synchronization of length `dt` does to this agent.
    ///
    /// `value` is the field concentration at the agent's position. The
    /// clock accrues before the duration comparison, and only while
    /// Active or Refractory.
    pub fn plan_update(&self, value: f64, dt: f64) -> AgentUpdate {
        match self.state {
            AgentState::Dormant => {
                if value > self.params.excitation_threshold {
                    AgentUpdate::Activate
                } else {
                    AgentUpdate::Idle
                }
            }
            AgentState::Active => {
                let clock = self.clock + dt;
                if clock > self.params.excited_duration && !self.permanent_beacon {
                    AgentUpdate::Deactivate
                } else {
                    AgentUpdate::Advance { clock }
                }
            }
            AgentState::Refractory => {
                let clock = self.clock + dt;
                if clock > self.params.refractory_duration {
                    AgentUpdate::Recover
                } else {
                    AgentUpdate::Advance { clock }
                }
            }
        }
    }

    /// Write back a planned update.
    pub fn apply(&mut self, update: AgentUpdate) {
        match update {
            AgentUpdate::Idle => {}
            AgentUpdate::Advance { clock } => self.clock = clock,
            AgentUpdate::Activate => self.activate(),
            AgentUpdate::Deactivate => self.deactivate(),
            AgentUpdate::Recover => self.recover(),
        }
    }

    /// Plan and apply in one go.
    pub fn update(&mut self, value: f64, dt: f64) -> AgentUpdate {
        let plan = self.plan_update(value, dt);
        self.apply(plan);
        plan
    }

    /// Whether the agent may propose a move right now.
    pub fn can_move(&self) -> bool {
        self.state == AgentState::Active && !self.permanent_beacon && !self.moved_this_cycle
    }

    /// Neighbouring sites worth moving to, best first.
    ///
    /// Scans the eight sites one agent step away (with wrap) and keeps
    /// those whose concentration beats the current site by more than
    /// [`MOVE_MARGIN`]. Ties keep the neighbourhood scan order. Empty
    /// when the agent [cannot move](Self::can_move).
    pub fn propose_move(&self, field: &CampField) -> Neighbourhood {
        if !self.can_move() {
            return Neighbourhood::new();
        }
        let here = field.value_at(self.position);
        let mut scored: smallvec::SmallVec<[(Site, f64); 8]> = field
            .lattice()
            .neighbourhood(self.position, self.params.lattice_factor)
            .into_iter()
            .map(|site| (site, field.value_at(site)))
            .filter(|&(_, value)| value > here + MOVE_MARGIN)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().map(|(site, _)| site).collect()
    }

    /// Move to `site`, which the caller has confirmed is free.
    ///
    /// Returns `false` and leaves the agent in place if it is the beacon
    /// or has already moved this cycle.
    pub fn move_to(&mut self, site: Site) -> bool {
        if self.permanent_beacon || self.moved_this_cycle {
            return false;
        }
        self.position = site;
        self.moved_this_cycle = true;
        true
    }
}
