//! Reusable agents, fields and arenas.
//!
//! - [`scenario_config`]: the 10x10 reference arena with default constants.
//! - [`dormant_agent`], [`active_agent`], [`beacon`]: agents with default
//!   parameters at a given site.
//! - [`FieldBuilder`] / [`field_with`]: fields with hand-placed values.
//! - [`restored_arena`]: an arena built from explicit agents and values.

use dicty_core::{AgentId, AgentParameters};
use dicty_engine::{Agent, Arena, ArenaConfig};
use dicty_field::{CampField, DiffusionParameters};
use dicty_space::Site;

/// The reference 10x10 arena: default constants, density 0.2, seed 42.
pub fn scenario_config() -> ArenaConfig {
    ArenaConfig {
        output_base: "scenario".to_string(),
        width: 10,
        height: 10,
        seed: 42,
        ..ArenaConfig::default()
    }
}

/// A dormant agent with default parameters.
pub fn dormant_agent(id: u32, x: u32, y: u32) -> Agent {
    Agent::new(AgentId(id), AgentParameters::default(), Site::new(x, y))
}

/// An agent that has just become Active.
pub fn active_agent(id: u32, x: u32, y: u32) -> Agent {
    let mut agent = dormant_agent(id, x, y);
    agent.activate();
    agent
}

/// A permanent beacon with the given multiplier, already Active.
pub fn beacon(id: u32, x: u32, y: u32, multiplier: f64) -> Agent {
    let mut agent = dormant_agent(id, x, y);
    agent.set_output_multiplier(multiplier);
    agent.make_permanent_beacon();
    agent.activate();
    agent
}

/// Builds a row-major value buffer for a `width x height` field.
pub struct FieldBuilder {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl FieldBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width as usize * height as usize],
        }
    }

    /// Set the value at `(x, y)`.
    pub fn set(mut self, x: u32, y: u32, value: f64) -> Self {
        self.values[x as usize * self.height as usize + y as usize] = value;
        self
    }

    /// Fill every site with `value`.
    pub fn fill(mut self, value: f64) -> Self {
        self.values.fill(value);
        self
    }

    /// The raw values, for [`Arena::restore`].
    pub fn values(self) -> Vec<f64> {
        self.values
    }

    /// A field with default diffusion parameters.
    pub fn build(self) -> CampField {
        CampField::from_values(
            self.width,
            self.height,
            DiffusionParameters::stable(1.0, 0.5),
            self.values,
        )
        .expect("fixture field must be valid")
    }
}

/// A field with the listed `((x, y), value)` points and zeros elsewhere.
pub fn field_with(width: u32, height: u32, points: &[((u32, u32), f64)]) -> CampField {
    points
        .iter()
        .fold(FieldBuilder::new(width, height), |b, &((x, y), v)| {
            b.set(x, y, v)
        })
        .build()
}

/// An arena on [`scenario_config`] holding exactly `agents` over `values`.
pub fn restored_arena(agents: Vec<Agent>, values: Vec<f64>) -> Arena {
    Arena::restore(scenario_config(), agents, values).expect("fixture arena must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicty_engine::AgentState;

    #[test]
    fn builder_places_values_row_major() {
        let f = FieldBuilder::new(3, 4).set(1, 2, 9.0).build();
        assert_eq!(f.value_at(Site::new(1, 2)), 9.0);
        assert_eq!(f.values()[6], 9.0);
    }

    #[test]
    fn beacon_fixture_is_active_and_pinned() {
        let b = beacon(0, 5, 5, 10.0);
        assert_eq!(b.state(), AgentState::Active);
        assert!(b.is_permanent_beacon());
        assert_eq!(b.output(), 30_000.0);
    }

    #[test]
    fn scenario_config_is_valid() {
        assert!(scenario_config().validate().is_ok());
    }
}
