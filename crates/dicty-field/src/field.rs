//! The cAMP concentration field.

use crate::error::FieldError;
use crate::params::DiffusionParameters;
use dicty_space::{wrap, Site, Torus2D};

/// Scalar cAMP concentration on a periodic lattice.
///
/// Three buffers of equal size, all indexed by [`Torus2D::index`]:
/// `grid` holds the published values, `previous` is the read side of the
/// next update, and `sources` holds the per-site release rate.
///
/// [`step`](Self::step) swaps `grid` and `previous` and then rewrites
/// `grid` entirely from `previous`, so readers never see a half-updated
/// grid and no allocation happens per step.
#[derive(Clone, Debug)]
pub struct CampField {
    lattice: Torus2D,
    params: DiffusionParameters,
    grid: Vec<f64>,
    previous: Vec<f64>,
    sources: Vec<f64>,
}

impl CampField {
    /// Create a zero field with no sources on a `width * height` torus.
    pub fn new(width: u32, height: u32, params: DiffusionParameters) -> Result<Self, FieldError> {
        let lattice = Torus2D::new(width, height)?;
        params.validate()?;
        let n = lattice.cell_count();
        Ok(Self {
            lattice,
            params,
            grid: vec![0.0; n],
            previous: vec![0.0; n],
            sources: vec![0.0; n],
        })
    }

    /// Rebuild a field from a row-major value buffer.
    ///
    /// Fails if `values` does not have exactly `width * height` entries
    /// or if any entry is negative or not finite. Sources start at zero.
    pub fn from_values(
        width: u32,
        height: u32,
        params: DiffusionParameters,
        values: Vec<f64>,
    ) -> Result<Self, FieldError> {
        let mut field = Self::new(width, height, params)?;
        if values.len() != field.grid.len() {
            return Err(FieldError::ShapeMismatch {
                expected: field.grid.len(),
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(FieldError::InvalidValue { index, value });
        }
        field.previous.copy_from_slice(&values);
        field.grid = values;
        Ok(field)
    }

    /// The lattice this field lives on.
    pub fn lattice(&self) -> &Torus2D {
        &self.lattice
    }

    /// The diffusion parameters in force.
    pub fn params(&self) -> &DiffusionParameters {
        &self.params
    }

    /// The explicit timestep.
    pub fn dt(&self) -> f64 {
        self.params.dt
    }

    /// Advance the field by one explicit Euler step.
    ///
    /// For every site:
    ///
    /// ```text
    /// next = prev + dt·( a²·((xp + xm − 2·prev)/dx² + (yp + ym − 2·prev)/dy²)
    ///                   − Γ·prev + source·dt )
    /// ```
    ///
    /// followed by clamping to `>= 0`.
    pub fn step(&mut self) {
        std::mem::swap(&mut self.grid, &mut self.previous);

        let w = self.lattice.width();
        let h = self.lattice.height();
        let hs = h as usize;
        let a2 = self.params.spacing * self.params.spacing;
        let (dx2, dy2) = (a2, a2);
        let dt = self.params.dt;
        let decay = self.params.decay;
        let prev = &self.previous;

        for x in 0..w {
            let row = x as usize * hs;
            let row_up = wrap(i64::from(x) + 1, w) as usize * hs;
            let row_down = wrap(i64::from(x) - 1, w) as usize * hs;
            for y in 0..h {
                let col = y as usize;
                let col_right = wrap(i64::from(y) + 1, h) as usize;
                let col_left = wrap(i64::from(y) - 1, h) as usize;
                let i = row + col;
                let p = prev[i];

                let lap_x = (prev[row_up + col] + prev[row_down + col] - 2.0 * p) / dx2;
                let lap_y = (prev[row + col_right] + prev[row + col_left] - 2.0 * p) / dy2;
                let next = p + dt * (a2 * (lap_x + lap_y) - decay * p + self.sources[i] * dt);

                self.grid[i] = next.max(0.0);
            }
        }
    }

    /// Concentration at `site`.
    ///
    /// Coordinates outside the lattice are wrapped onto it.
    pub fn value_at(&self, site: Site) -> f64 {
        let site = Site::new(
            site.x % self.lattice.width(),
            site.y % self.lattice.height(),
        );
        self.grid[self.lattice.index(site)]
    }

    /// Set the release rate at `site`, replacing any previous value there.
    pub fn set_source(&mut self, site: Site, rate: f64) -> Result<(), FieldError> {
        let site = self.lattice.check(site)?;
        let i = self.lattice.index(site);
        self.sources[i] = rate;
        Ok(())
    }

    /// Zero the whole source grid.
    pub fn clear_sources(&mut self) {
        self.sources.fill(0.0);
    }

    /// Release rate currently set at `site`.
    pub fn source_at(&self, site: Site) -> Option<f64> {
        self.lattice
            .contains(site)
            .then(|| self.sources[self.lattice.index(site)])
    }

    /// Current values, row-major (`x * height + y`).
    pub fn values(&self) -> &[f64] {
        &self.grid
    }

    /// Sum of all values.
    pub fn total_mass(&self) -> f64 {
        self.grid.iter().sum()
    }

    /// Largest value on the grid.
    pub fn max_value(&self) -> f64 {
        self.grid.iter().copied().fold(0.0, f64::max)
    }
}
