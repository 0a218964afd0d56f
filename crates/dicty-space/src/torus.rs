//! 2D torus with 8-connected neighbourhood.

use crate::error::SpaceError;
use crate::site::Site;
use smallvec::SmallVec;

/// All 8 offsets as `(dx, dy)`: N, S, W, E, NW, NE, SW, SE.
///
/// This order is the tie-break order for neighbourhood scans.
pub const OFFSETS_8: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// The eight neighbours of a site, in [`OFFSETS_8`] order.
pub type Neighbourhood = SmallVec<[Site; 8]>;

/// Map `index` onto `[0, dim)` with periodic wraparound.
///
/// `-1` maps to `dim - 1` and `dim` maps to `0`. `dim` must be non-zero;
/// [`Torus2D`] construction guarantees this for its own axes.
pub fn wrap(index: i64, dim: u32) -> u32 {
    debug_assert!(dim > 0, "wrap on an empty axis");
    index.rem_euclid(i64::from(dim)) as u32
}

/// A two-dimensional periodic lattice.
///
/// Sites are addressed as `(x, y)` with `x` in `[0, width)` and `y` in
/// `[0, height)`. Flat indices are row-major over `x`: `x * height + y`,
/// matching the row-per-line layout of exported field matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus2D {
    width: u32,
    height: u32,
}

impl Torus2D {
    /// Maximum size of either axis. Offsets are computed in `i64`, so
    /// anything up to `i32::MAX` wraps without overflow.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a torus with `width * height` sites.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds [`Self::MAX_DIM`].
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Extent along `x` (number of rows).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Extent along `y` (number of columns).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of sites.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The site at the centre of the lattice, `(width / 2, height / 2)`.
    pub fn center(&self) -> Site {
        Site::new(self.width / 2, self.height / 2)
    }

    /// Whether `site` lies inside the lattice.
    pub fn contains(&self, site: Site) -> bool {
        site.x < self.width && site.y < self.height
    }

    /// Return `site` unchanged if it is inside the lattice.
    pub fn check(&self, site: Site) -> Result<Site, SpaceError> {
        if self.contains(site) {
            Ok(site)
        } else {
            Err(SpaceError::SiteOutOfBounds {
                site,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Flat row-major index of `site`. The site must be in bounds.
    pub fn index(&self, site: Site) -> usize {
        debug_assert!(self.contains(site), "site {site} out of bounds");
        site.x as usize * self.height as usize + site.y as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn site_at(&self, index: usize) -> Site {
        let h = self.height as usize;
        Site::new((index / h) as u32, (index % h) as u32)
    }

    /// Translate `site` by `(dx, dy)`, wrapping on both axes.
    pub fn offset(&self, site: Site, dx: i64, dy: i64) -> Site {
        Site::new(
            wrap(i64::from(site.x) + dx, self.width),
            wrap(i64::from(site.y) + dy, self.height),
        )
    }

    /// The 8 neighbours of `site` at distance `step` along each axis.
    ///
    /// Returned in [`OFFSETS_8`] order. On small lattices (or large steps)
    /// neighbours may coincide with each other or with `site` itself.
    pub fn neighbourhood(&self, site: Site, step: u32) -> Neighbourhood {
        let s = i64::from(step);
        OFFSETS_8
            .iter()
            .map(|&(dx, dy)| self.offset(site, dx * s, dy * s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(x: u32, y: u32) -> Site {
        Site::new(x, y)
    }

    // ── wrap ────────────────────────────────────────────────────

    #[test]
    fn wrap_in_range_is_identity() {
        assert_eq!(wrap(0, 5), 0);
        assert_eq!(wrap(4, 5), 4);
    }

    #[test]
    fn wrap_minus_one_is_last() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-6, 5), 4);
    }

    #[test]
    fn wrap_dim_is_zero() {
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(7, 5), 2);
    }

    // ── Constructor ─────────────────────────────────────────────

    #[test]
    fn new_zero_dims_returns_error() {
        assert_eq!(Torus2D::new(0, 5), Err(SpaceError::EmptySpace));
        assert_eq!(Torus2D::new(5, 0), Err(SpaceError::EmptySpace));
    }

    #[test]
    fn new_rejects_dims_exceeding_max() {
        let big = Torus2D::MAX_DIM + 1;
        assert!(matches!(
            Torus2D::new(big, 5),
            Err(SpaceError::DimensionTooLarge { name: "width", .. })
        ));
        assert!(matches!(
            Torus2D::new(5, big),
            Err(SpaceError::DimensionTooLarge { name: "height", .. })
        ));
    }

    // ── Indexing ────────────────────────────────────────────────

    #[test]
    fn index_is_row_major_over_x() {
        let t = Torus2D::new(3, 4).unwrap();
        assert_eq!(t.index(s(0, 0)), 0);
        assert_eq!(t.index(s(0, 3)), 3);
        assert_eq!(t.index(s(1, 0)), 4);
        assert_eq!(t.index(s(2, 3)), 11);
        assert_eq!(t.site_at(7), s(1, 3));
        assert_eq!(t.cell_count(), 12);
    }

    #[test]
    fn center_of_even_and_odd() {
        assert_eq!(Torus2D::new(10, 10).unwrap().center(), s(5, 5));
        assert_eq!(Torus2D::new(7, 4).unwrap().center(), s(3, 2));
    }

    #[test]
    fn check_rejects_outside() {
        let t = Torus2D::new(3, 3).unwrap();
        assert_eq!(t.check(s(2, 2)), Ok(s(2, 2)));
        assert!(matches!(
            t.check(s(3, 0)),
            Err(SpaceError::SiteOutOfBounds { .. })
        ));
    }

    // ── Neighbourhood ───────────────────────────────────────────

    #[test]
    fn neighbourhood_interior() {
        let t = Torus2D::new(5, 5).unwrap();
        let n = t.neighbourhood(s(2, 2), 1);
        assert_eq!(n.len(), 8);
        assert_eq!(n[0], s(1, 2));
        assert_eq!(n[1], s(3, 2));
        assert_eq!(n[2], s(2, 1));
        assert_eq!(n[3], s(2, 3));
        assert_eq!(n[7], s(3, 3));
    }

    #[test]
    fn neighbourhood_wraps_at_corner() {
        let t = Torus2D::new(5, 5).unwrap();
        let n = t.neighbourhood(s(0, 0), 1);
        assert!(n.contains(&s(4, 4))); // NW wraps on both axes
        assert!(n.contains(&s(4, 0))); // N wraps
        assert!(n.contains(&s(0, 4))); // W wraps
    }

    #[test]
    fn neighbourhood_with_larger_step() {
        let t = Torus2D::new(10, 10).unwrap();
        let n = t.neighbourhood(s(0, 0), 2);
        assert_eq!(n[0], s(8, 0));
        assert_eq!(n[3], s(0, 2));
        assert_eq!(n[4], s(8, 8));
    }

    #[test]
    fn single_site_neighbourhood_is_self() {
        let t = Torus2D::new(1, 1).unwrap();
        let n = t.neighbourhood(s(0, 0), 1);
        assert_eq!(n.len(), 8);
        assert!(n.iter().all(|&nb| nb == s(0, 0)));
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn wrap_always_in_range(index in -1_000i64..1_000, dim in 1u32..50) {
            prop_assert!(wrap(index, dim) < dim);
        }

        #[test]
        fn neighbours_symmetric(
            w in 3u32..12,
            h in 3u32..12,
            x in 0u32..12,
            y in 0u32..12,
        ) {
            let t = Torus2D::new(w, h).unwrap();
            let site = s(x % w, y % h);
            for nb in t.neighbourhood(site, 1) {
                prop_assert!(t.contains(nb));
                prop_assert_ne!(nb, site);
                prop_assert!(
                    t.neighbourhood(nb, 1).contains(&site),
                    "neighbour symmetry violated: {} in N({}) but not vice versa",
                    nb, site,
                );
            }
        }

        #[test]
        fn index_roundtrip(w in 1u32..20, h in 1u32..20, i in 0usize..400) {
            let t = Torus2D::new(w, h).unwrap();
            let i = i % t.cell_count();
            prop_assert_eq!(t.index(t.site_at(i)), i);
        }
    }
}
