//! Arena and run configuration, validation, and error types.
//!
//! [`ArenaConfig`] is the input for building an [`Arena`](crate::Arena).
//! [`validate()`](ArenaConfig::validate) checks every structural invariant
//! before any agent is placed or any step is taken.

use std::error::Error;
use std::fmt;

use dicty_core::error::{require_non_negative, require_positive};
use dicty_core::{AgentId, ModelParameters, ParameterError};
use dicty_field::{DiffusionParameters, FieldError};
use dicty_space::{Site, SpaceError, Torus2D};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a configuration or restoring an arena.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A model or arena parameter is out of range.
    Parameter(ParameterError),
    /// The lattice is empty, or a site lies outside it.
    Space(SpaceError),
    /// The diffusion field rejected its parameters or imported values.
    Field(FieldError),
    /// The density and extents yield no ordinary agents.
    EmptyPopulation {
        /// Configured density.
        density: f64,
        /// Arena width in agent-lattice units.
        width: u32,
        /// Arena height in agent-lattice units.
        height: u32,
    },
    /// More agents requested than there are free agent-lattice sites.
    Overcrowded {
        /// Requested ordinary population.
        requested: usize,
        /// Sites available once the beacon is placed.
        available: usize,
    },
    /// The field is not a whole number of agent steps across, so wrapped
    /// moves would leave the agent lattice.
    MisalignedLattice {
        /// Field sites along `x`.
        field_width: u32,
        /// Field sites along `y`.
        field_height: u32,
        /// Field sites per agent step.
        factor: u32,
    },
    /// Synchronization interval is zero.
    ZeroSyncInterval,
    /// Sampling interval is zero.
    ZeroSampling,
    /// Two restored agents share an id.
    DuplicateAgentId {
        /// The repeated id.
        id: AgentId,
    },
    /// A restored agent sits outside the field lattice.
    AgentOutOfBounds {
        /// The agent.
        id: AgentId,
        /// Its recorded position.
        site: Site,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(e) => write!(f, "invalid parameter: {e}"),
            Self::Space(e) => write!(f, "invalid lattice: {e}"),
            Self::Field(e) => write!(f, "invalid field: {e}"),
            Self::EmptyPopulation {
                density,
                width,
                height,
            } => write!(
                f,
                "density {density} on a {width}x{height} arena yields no agents"
            ),
            Self::Overcrowded {
                requested,
                available,
            } => write!(
                f,
                "{requested} agents requested but only {available} free sites"
            ),
            Self::MisalignedLattice {
                field_width,
                field_height,
                factor,
            } => write!(
                f,
                "{field_width}x{field_height} field is not a multiple of the agent step {factor}"
            ),
            Self::ZeroSyncInterval => write!(f, "sync_interval must be at least 1"),
            Self::ZeroSampling => write!(f, "sampling interval must be at least 1"),
            Self::DuplicateAgentId { id } => write!(f, "agent id {id} appears more than once"),
            Self::AgentOutOfBounds { id, site } => {
                write!(f, "agent {id} at {site} lies outside the field")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameter(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for ConfigError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

// ── ArenaConfig ────────────────────────────────────────────────────

/// Everything needed to build an [`Arena`](crate::Arena).
///
/// `width` and `height` are in agent-lattice units; the field has
/// `floor(width / a) x floor(height / a)` sites. Agents step
/// [`lattice_factor`](ModelParameters::lattice_factor) field sites at a
/// time, and each field side must be a multiple of that step.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Base path for snapshot files. Default: `"dicty"`.
    pub output_base: String,
    /// Physical constants.
    pub model: ModelParameters,
    /// Arena width. Default: 10.
    pub width: u32,
    /// Arena height. Default: 10.
    pub height: u32,
    /// Ordinary agents per agent-lattice site (`ρ`). Default: 0.2.
    pub density: f64,
    /// Output multiplier of the central beacon. Default: 10.
    pub beacon_multiplier: f64,
    /// Field steps between agent synchronizations. Default: 10.
    pub sync_interval: u64,
    /// Placement RNG seed. Default: 0.
    pub seed: u64,
    /// Explicit field timestep. `None` derives a stable one from the spacing.
    pub dt: Option<f64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            output_base: "dicty".to_string(),
            model: ModelParameters::default(),
            width: 10,
            height: 10,
            density: 0.2,
            beacon_multiplier: 10.0,
            sync_interval: 10,
            seed: 0,
            dt: None,
        }
    }
}

impl ArenaConfig {
    /// Diffusion parameters for the field, honouring an explicit `dt`.
    pub fn diffusion(&self) -> DiffusionParameters {
        let mut params = DiffusionParameters::from_model(&self.model);
        if let Some(dt) = self.dt {
            params.dt = dt;
        }
        params
    }

    /// Field sites along `x`.
    pub fn field_width(&self) -> u32 {
        self.model.sites_along(self.width)
    }

    /// Field sites along `y`.
    pub fn field_height(&self) -> u32 {
        self.model.sites_along(self.height)
    }

    /// Number of ordinary agents: `floor(density * width * height)`.
    pub fn population(&self) -> usize {
        let n = (self.density * f64::from(self.width) * f64::from(self.height)).floor();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Agent-lattice extents: positions `k * factor` that fit on the field.
    pub fn agent_extents(&self) -> (u32, u32) {
        let factor = self.model.lattice_factor();
        (
            self.field_width().div_ceil(factor),
            self.field_height().div_ceil(factor),
        )
    }

    /// Where the beacon sits: the field centre, snapped onto the agent lattice.
    pub fn beacon_site(&self) -> Result<Site, ConfigError> {
        let factor = self.model.lattice_factor();
        let centre = Torus2D::new(self.field_width(), self.field_height())?.center();
        Ok(Site::new(
            centre.x / factor * factor,
            centre.y / factor * factor,
        ))
    }

    /// Simulated time between two synchronizations.
    pub fn sync_dt(&self) -> f64 {
        self.sync_interval as f64 * self.diffusion().dt
    }

    /// Validate everything that does not depend on the population.
    ///
    /// Used on restore, where agents come from a roster rather than
    /// from the density.
    pub fn validate_model(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(SpaceError::EmptySpace.into());
        }
        let (field_width, field_height) = (self.field_width(), self.field_height());
        Torus2D::new(field_width, field_height)?;
        let factor = self.model.lattice_factor();
        if field_width % factor != 0 || field_height % factor != 0 {
            return Err(ConfigError::MisalignedLattice {
                field_width,
                field_height,
                factor,
            });
        }
        require_non_negative("density", self.density)?;
        require_positive("beacon_multiplier", self.beacon_multiplier)?;
        if self.sync_interval == 0 {
            return Err(ConfigError::ZeroSyncInterval);
        }
        self.diffusion().validate()?;
        Ok(())
    }

    /// Full validation, including population bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_model()?;
        let requested = self.population();
        if requested == 0 {
            return Err(ConfigError::EmptyPopulation {
                density: self.density,
                width: self.width,
                height: self.height,
            });
        }
        let (ax, ay) = self.agent_extents();
        let available = (ax as usize * ay as usize).saturating_sub(1);
        if requested > available {
            return Err(ConfigError::Overcrowded {
                requested,
                available,
            });
        }
        Ok(())
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Run length and sampling cadence for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of field steps to run. Default: 100.
    pub max_steps: u64,
    /// Observer is called every `sampling` steps. Default: 10.
    pub sampling: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            sampling: 10,
        }
    }
}

impl SimulationConfig {
    /// Reject a zero sampling interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling == 0 {
            return Err(ConfigError::ZeroSampling);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let cfg = ArenaConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.population(), 20);
        assert_eq!(cfg.field_width(), 10);
        assert_eq!(cfg.beacon_site(), Ok(Site::new(5, 5)));
        assert_eq!(cfg.sync_dt(), 1.25);
    }

    #[test]
    fn zero_population_rejected() {
        let cfg = ArenaConfig {
            density: 0.001,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyPopulation { .. })
        ));
    }

    #[test]
    fn negative_density_rejected() {
        let cfg = ArenaConfig {
            density: -0.2,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Parameter(ParameterError::Negative { .. }))
        ));
    }

    #[test]
    fn full_density_is_overcrowded() {
        let cfg = ArenaConfig {
            density: 1.0,
            ..ArenaConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Overcrowded {
                requested: 100,
                available: 99
            })
        );
    }

    #[test]
    fn zero_dimension_rejected() {
        let cfg = ArenaConfig {
            width: 0,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Space(SpaceError::EmptySpace))
        ));
    }

    #[test]
    fn zero_sync_interval_rejected() {
        let cfg = ArenaConfig {
            sync_interval: 0,
            ..ArenaConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSyncInterval));
    }

    #[test]
    fn unstable_dt_rejected() {
        let cfg = ArenaConfig {
            dt: Some(0.5),
            ..ArenaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Field(FieldError::UnstableTimestep { .. }))
        ));
    }

    #[test]
    fn fine_spacing_scales_field_and_beacon() {
        let mut cfg = ArenaConfig::default();
        cfg.model.lattice_spacing = 0.5;
        assert_eq!(cfg.field_width(), 20);
        assert_eq!(cfg.agent_extents(), (10, 10));
        assert_eq!(cfg.beacon_site(), Ok(Site::new(10, 10)));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn spacing_truncates_field_and_factor() {
        let mut cfg = ArenaConfig::default();
        cfg.model.lattice_spacing = 0.6;
        assert_eq!(cfg.model.lattice_factor(), 1);
        assert_eq!(cfg.field_width(), 16);
        assert_eq!(cfg.agent_extents(), (16, 16));
        assert_eq!(cfg.beacon_site(), Ok(Site::new(8, 8)));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn field_not_multiple_of_agent_step_rejected() {
        let mut cfg = ArenaConfig::default();
        cfg.model.lattice_spacing = 0.4;
        assert_eq!(cfg.model.lattice_factor(), 2);
        assert_eq!(cfg.field_width(), 25);
        assert_eq!(
            cfg.validate_model(),
            Err(ConfigError::MisalignedLattice {
                field_width: 25,
                field_height: 25,
                factor: 2
            })
        );

        // 12 / 0.4 = 30 sites, a whole number of agent steps
        cfg.width = 12;
        cfg.height = 12;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn odd_centre_snaps_to_agent_lattice() {
        let mut cfg = ArenaConfig {
            width: 7,
            height: 7,
            ..ArenaConfig::default()
        };
        cfg.model.lattice_spacing = 0.5;
        // field is 14x14, centre 7, snapped down to 6
        assert_eq!(cfg.beacon_site(), Ok(Site::new(6, 6)));
    }

    #[test]
    fn sampling_zero_rejected() {
        let cfg = SimulationConfig {
            sampling: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSampling));
        assert!(SimulationConfig::default().validate().is_ok());
    }
}
