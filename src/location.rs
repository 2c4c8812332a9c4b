use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A grid extent, which is never zero.
pub type Dimension = NonZero<Coord>;

/// A location `(row, col)` on a grid. The top left corner is `Location(0, 0)`.
///
/// Locations order row-major, which is also the order in which grids are built.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row, or `x` component.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, or `y` component.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    // wraps on underflow; the result is then out of bounds for any real grid
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies inside a grid of `dims` (rows, cols).
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
