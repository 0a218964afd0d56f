//! Immutable model parameters.
//!
//! [`ModelParameters`] is the single source of truth for the physical
//! constants of a run. It is passed by value to the field and to every
//! agent at construction time; nothing reads it from global state.

use crate::error::{require_non_negative, require_positive, ParameterError};

/// Physical constants of the cAMP model.
///
/// Defaults reproduce the reference experiment: threshold 20, release
/// 6000 per excitation, excited for 2 time units, refractory for 20,
/// unit lattice spacing and decay rate 0.5.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParameters {
    /// Concentration above which a dormant cell becomes excited (`c_T`).
    pub excitation_threshold: f64,
    /// cAMP released by one cell over a whole excitation (`δc`).
    pub release_amount: f64,
    /// Time a cell stays excited (`τ`).
    pub excited_duration: f64,
    /// Time a cell stays refractory after excitation (`t_R`).
    pub refractory_duration: f64,
    /// Distance between neighbouring field sites (`a`).
    pub lattice_spacing: f64,
    /// First-order cAMP decay rate (`Γ`).
    pub decay_rate: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            excitation_threshold: 20.0,
            release_amount: 6000.0,
            excited_duration: 2.0,
            refractory_duration: 20.0,
            lattice_spacing: 1.0,
            decay_rate: 0.5,
        }
    }
}

impl ModelParameters {
    /// Validate every parameter.
    ///
    /// All values must be finite. Durations, spacing and release amount
    /// must be strictly positive; threshold and decay may be zero.
    pub fn validate(&self) -> Result<(), ParameterError> {
        require_non_negative("excitation_threshold", self.excitation_threshold)?;
        require_positive("release_amount", self.release_amount)?;
        require_positive("excited_duration", self.excited_duration)?;
        require_positive("refractory_duration", self.refractory_duration)?;
        require_positive("lattice_spacing", self.lattice_spacing)?;
        require_non_negative("decay_rate", self.decay_rate)?;
        Ok(())
    }

    /// Number of field sites an agent crosses in one move.
    ///
    /// `floor(1 / a)`, never less than 1.
    pub fn lattice_factor(&self) -> u32 {
        let factor = (1.0 / self.lattice_spacing).floor();
        if factor.is_finite() && factor >= 1.0 {
            factor as u32
        } else {
            1
        }
    }

    /// Number of field sites along an axis spanning `extent` agent-lattice
    /// units: `floor(extent / a)`.
    pub fn sites_along(&self, extent: u32) -> u32 {
        let sites = (f64::from(extent) / self.lattice_spacing).floor();
        if sites.is_finite() && sites >= 0.0 {
            sites as u32
        } else {
            0
        }
    }

    /// The per-agent constants carried by every cell.
    pub fn agent_parameters(&self) -> AgentParameters {
        AgentParameters {
            excitation_threshold: self.excitation_threshold,
            release_amount: self.release_amount,
            excited_duration: self.excited_duration,
            refractory_duration: self.refractory_duration,
            lattice_factor: self.lattice_factor(),
        }
    }
}

/// The subset of [`ModelParameters`] an individual agent needs.
///
/// Stored per agent so that a roster can describe cells with differing
/// constants (e.g. when an experiment perturbs a subpopulation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentParameters {
    /// Excitation threshold.
    pub excitation_threshold: f64,
    /// Total release per excitation.
    pub release_amount: f64,
    /// Duration of the excited state.
    pub excited_duration: f64,
    /// Duration of the refractory state.
    pub refractory_duration: f64,
    /// Field sites per agent step.
    pub lattice_factor: u32,
}

impl Default for AgentParameters {
    fn default() -> Self {
        ModelParameters::default().agent_parameters()
    }
}

impl AgentParameters {
    /// Validate the per-agent constants.
    pub fn validate(&self) -> Result<(), ParameterError> {
        require_non_negative("excitation_threshold", self.excitation_threshold)?;
        require_positive("release_amount", self.release_amount)?;
        require_positive("excited_duration", self.excited_duration)?;
        require_positive("refractory_duration", self.refractory_duration)?;
        if self.lattice_factor == 0 {
            return Err(ParameterError::NotPositive {
                name: "lattice_factor",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Release rate of an excited cell: `release_amount / excited_duration`.
    pub fn release_rate(&self) -> f64 {
        self.release_amount / self.excited_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_validate() {
        assert!(ModelParameters::default().validate().is_ok());
        assert!(AgentParameters::default().validate().is_ok());
    }

    #[test]
    fn default_release_rate() {
        assert_eq!(AgentParameters::default().release_rate(), 3000.0);
    }

    #[test]
    fn zero_spacing_rejected() {
        let p = ModelParameters {
            lattice_spacing: 0.0,
            ..ModelParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::NotPositive {
                name: "lattice_spacing",
                ..
            })
        ));
    }

    #[test]
    fn negative_decay_rejected() {
        let p = ModelParameters {
            decay_rate: -0.5,
            ..ModelParameters::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_decay_allowed() {
        let p = ModelParameters {
            decay_rate: 0.0,
            ..ModelParameters::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn lattice_factor_from_spacing() {
        let mut p = ModelParameters::default();
        assert_eq!(p.lattice_factor(), 1);
        p.lattice_spacing = 0.5;
        assert_eq!(p.lattice_factor(), 2);
        p.lattice_spacing = 0.25;
        assert_eq!(p.lattice_factor(), 4);
        p.lattice_spacing = 2.0;
        assert_eq!(p.lattice_factor(), 1);
    }

    #[test]
    fn lattice_factor_truncates() {
        let mut p = ModelParameters {
            lattice_spacing: 0.4,
            ..ModelParameters::default()
        };
        assert_eq!(p.lattice_factor(), 2);
        p.lattice_spacing = 0.6;
        assert_eq!(p.lattice_factor(), 1);
        p.lattice_spacing = 0.3;
        assert_eq!(p.lattice_factor(), 3);
    }

    #[test]
    fn sites_along_scales_with_spacing() {
        let mut p = ModelParameters::default();
        assert_eq!(p.sites_along(10), 10);
        p.lattice_spacing = 0.5;
        assert_eq!(p.sites_along(10), 20);
        p.lattice_spacing = 0.6;
        assert_eq!(p.sites_along(10), 16);
        p.lattice_spacing = 0.4;
        assert_eq!(p.sites_along(10), 25);
    }

    #[test]
    fn agent_parameters_project_model() {
        let p = ModelParameters {
            excitation_threshold: 5.0,
            lattice_spacing: 0.5,
            ..ModelParameters::default()
        };
        let a = p.agent_parameters();
        assert_eq!(a.excitation_threshold, 5.0);
        assert_eq!(a.lattice_factor, 2);
        assert_eq!(a.excited_duration, p.excited_duration);
    }

    proptest! {
        #[test]
        fn lattice_factor_never_zero(spacing in 1e-3f64..1e3) {
            let p = ModelParameters { lattice_spacing: spacing, ..ModelParameters::default() };
            prop_assert!(p.lattice_factor() >= 1);
        }
    }
}
