use strum::{Display, EnumString, VariantArray};

use crate::location::Location;

/// One orthogonal move on a grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// One column lower.
    Left,
    /// One column higher.
    Right,
    /// One row lower.
    Up,
    /// One row higher.
    Down,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the grid; callers check bounds.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
        }
    }

    /// Determine the direction from `a` to `b`, if they are orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

/// The order in which a vertex enumerates its neighbors.
///
/// A* breaks ties between equally promising candidates by discovery order, so this decides which of several shortest paths is found.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NeighborOrder {
    /// Left, right, up, down.
    #[default]
    LeftRightUpDown,
    /// Right, left, down, up.
    RightLeftDownUp,
}

impl NeighborOrder {
    /// The steps in enumeration order.
    pub fn steps(&self) -> &'static [SquareStep] {
        match self {
            Self::LeftRightUpDown => &[SquareStep::Left, SquareStep::Right, SquareStep::Up, SquareStep::Down],
            Self::RightLeftDownUp => &[SquareStep::Right, SquareStep::Left, SquareStep::Down, SquareStep::Up],
        }
    }

    /// The position of `step` in this order.
    pub(crate) fn rank(&self, step: SquareStep) -> usize {
        self.steps().iter().position(|s| *s == step).unwrap_or(usize::MAX)
    }
}
