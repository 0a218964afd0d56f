//! Diffusion parameters and stability bounds.

use crate::error::FieldError;
use dicty_core::error::{require_non_negative, require_positive};
use dicty_core::ModelParameters;

/// Spacing, decay and timestep of the explicit diffusion scheme.
///
/// The diffusion coefficient is `a²` and the grid spacing is `a` on both
/// axes, so the discrete Laplacian term reduces to
/// `(xp + xm + yp + ym - 4·prev)` regardless of `a`. The timestep bounds
/// are therefore independent of the spacing, but they are still written in
/// their general form so that the derivation stays visible in one place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionParameters {
    /// Lattice spacing `a`.
    pub spacing: f64,
    /// First-order decay rate `Γ`.
    pub decay: f64,
    /// Explicit timestep `dt`.
    pub dt: f64,
}

impl DiffusionParameters {
    /// Parameters with the default timestep, half of [`max_stable_dt`](Self::max_stable_dt).
    pub fn stable(spacing: f64, decay: f64) -> Self {
        Self {
            spacing,
            decay,
            dt: 0.5 * Self::max_stable_dt(spacing),
        }
    }

    /// Parameters derived from a model, with the default timestep.
    pub fn from_model(model: &ModelParameters) -> Self {
        Self::stable(model.lattice_spacing, model.decay_rate)
    }

    /// Diffusion stability bound `0.5 · dx²·dy² / (D · (dx² + dy²))`.
    pub fn max_stable_dt(spacing: f64) -> f64 {
        let a2 = spacing * spacing;
        let (dx2, dy2) = (a2, a2);
        0.5 * (dx2 * dy2) / (a2 * (dx2 + dy2))
    }

    /// Positivity bound `1 / (2D/dx² + 2D/dy² + Γ)`.
    ///
    /// Beyond this the update coefficient on the centre value goes
    /// negative and the clamp starts destroying mass.
    pub fn max_positive_dt(spacing: f64, decay: f64) -> f64 {
        let a2 = spacing * spacing;
        let (dx2, dy2) = (a2, a2);
        1.0 / (2.0 * a2 / dx2 + 2.0 * a2 / dy2 + decay)
    }

    /// The tighter of the two timestep bounds.
    pub fn max_dt(&self) -> f64 {
        Self::max_stable_dt(self.spacing).min(Self::max_positive_dt(self.spacing, self.decay))
    }

    /// Check every parameter and both timestep bounds.
    pub fn validate(&self) -> Result<(), FieldError> {
        require_positive("lattice_spacing", self.spacing)?;
        require_non_negative("decay_rate", self.decay)?;
        require_positive("dt", self.dt)?;
        let max = self.max_dt();
        if self.dt > max {
            return Err(FieldError::UnstableTimestep { dt: self.dt, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicty_core::ParameterError;

    #[test]
    fn default_dt_is_an_eighth() {
        let p = DiffusionParameters::stable(1.0, 0.5);
        assert_eq!(DiffusionParameters::max_stable_dt(1.0), 0.25);
        assert_eq!(p.dt, 0.125);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn bound_independent_of_spacing() {
        for a in [0.25, 0.5, 1.0, 2.0] {
            let max = DiffusionParameters::max_stable_dt(a);
            assert!((max - 0.25).abs() < 1e-12, "a={a} max={max}");
        }
    }

    #[test]
    fn positivity_bound_with_decay() {
        assert_eq!(DiffusionParameters::max_positive_dt(1.0, 0.0), 0.25);
        assert_eq!(DiffusionParameters::max_positive_dt(1.0, 4.0), 0.125);
    }

    #[test]
    fn default_dt_fails_for_large_decay() {
        let p = DiffusionParameters::stable(1.0, 5.0);
        assert!(matches!(
            p.validate(),
            Err(FieldError::UnstableTimestep { .. })
        ));
    }

    #[test]
    fn explicit_dt_above_bound_rejected() {
        let p = DiffusionParameters {
            spacing: 1.0,
            decay: 0.5,
            dt: 0.3,
        };
        match p.validate() {
            Err(FieldError::UnstableTimestep { dt, max }) => {
                assert_eq!(dt, 0.3);
                assert!(max < 0.25);
            }
            other => panic!("expected UnstableTimestep, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_dt_rejected() {
        let p = DiffusionParameters {
            spacing: 1.0,
            decay: 0.5,
            dt: 0.0,
        };
        assert!(matches!(
            p.validate(),
            Err(FieldError::Parameter(ParameterError::NotPositive { name: "dt", .. }))
        ));
    }

    #[test]
    fn from_model_uses_model_constants() {
        let model = ModelParameters {
            decay_rate: 1.5,
            ..ModelParameters::default()
        };
        let p = DiffusionParameters::from_model(&model);
        assert_eq!(p.decay, 1.5);
        assert_eq!(p.spacing, 1.0);
    }
}
