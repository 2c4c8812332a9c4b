use std::fmt::{Display, Formatter};

use crate::error::GraphError;

/// The label of a single grid cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// A walkable cell, written as a space.
    #[default]
    Open,
    /// A walkable point of interest labelled `'A'..='Z'`.
    Named(char),
    /// An impassable cell, written as `*`.
    Obstacle,
}

impl Cell {
    pub(crate) const OBSTACLE_LABEL: char = '*';

    /// The character this cell was read from.
    pub fn label(&self) -> char {
        match self {
            Self::Open => ' ',
            Self::Named(name) => *name,
            Self::Obstacle => Self::OBSTACLE_LABEL,
        }
    }

    /// The obstacle flag; search never propagates cost into such a cell.
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Self::Obstacle)
    }

    /// The name of a point of interest, if this is one.
    pub fn name(&self) -> Option<char> {
        match self {
            Self::Named(name) => Some(*name),
            _ => None,
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = GraphError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            ' ' => Ok(Self::Open),
            Self::OBSTACLE_LABEL => Ok(Self::Obstacle),
            'A'..='Z' => Ok(Self::Named(value)),
            other => Err(GraphError::invalid_input(format!("unexpected cell label {other:?}"))),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
