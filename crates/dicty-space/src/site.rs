//! Lattice coordinates.

use std::fmt;

/// An integer position on the lattice.
///
/// `x` indexes the first (row) axis of the field matrix, `y` the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    /// Row coordinate.
    pub x: u32,
    /// Column coordinate.
    pub y: u32,
}

impl Site {
    /// Construct a site from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Site {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}
