//! Search configuration.

use strum::{Display, EnumString, VariantArray};

use crate::location::Location;
use crate::step::NeighborOrder;

/// The distance estimate A* uses to rank candidates.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Heuristic {
    /// `|dx| + |dy|`. Admissible on a 4-connected unit grid, so A* returns true shortest distances.
    #[default]
    Manhattan,
    /// `2 * |dx|`, ignoring the column entirely.
    ///
    /// Only useful for matching outputs computed with this estimate. It can overestimate,
    /// so reported distances may exceed the true shortest distance; reachability is unaffected.
    RowDoubled,
}

impl Heuristic {
    /// Estimate the number of steps from `from` to `to`.
    pub fn estimate(&self, from: Location, to: Location) -> u32 {
        let dx = from.row().abs_diff(to.row());
        let dy = from.col().abs_diff(to.col());
        let estimate = match self {
            Self::Manhattan => dx + dy,
            Self::RowDoubled => dx + dx,
        };
        u32::try_from(estimate).unwrap_or(u32::MAX)
    }
}

/// Settings shared by every search over a [`GridGraph`](crate::GridGraph).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Distance estimate used by A*.
    pub heuristic: Heuristic,
    /// Neighbor enumeration order, which settles ties.
    pub neighbor_order: NeighborOrder,
}
