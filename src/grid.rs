use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::Cell;
use crate::error::{GraphError, GraphResult};
use crate::location::{Dimension, Location};

/// A rectangular grid of [`Cell`]s, as read from text.
///
/// This is the raw input a [`GridBuilder`](crate::GridBuilder) turns into a [`GridGraph`](crate::GridGraph).
/// Rows must be non-empty and of equal length; every character must be a space, an uppercase letter, or `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    // rows, cols
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
}

impl CellGrid {
    /// Parse `rows` into a grid, failing with [`InvalidInput`](GraphError::InvalidInput) on an empty or ragged grid or an unknown label.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GraphResult<Self> {
        let rows = rows.iter()
            .map(|row| row.as_ref().chars().map(Cell::try_from).collect::<GraphResult<Vec<_>>>())
            .collect::<GraphResult<Vec<_>>>()?;

        let width = match rows.iter().map(Vec::len).all_equal_value() {
            Ok(width) => width,
            Err(None) => return Err(GraphError::invalid_input("grid has no rows")),
            Err(Some((a, b))) => return Err(GraphError::invalid_input(format!("grid is not rectangular: rows of length {a} and {b}"))),
        };

        let dims = match (NonZero::new(rows.len()), NonZero::new(width)) {
            (Some(height), Some(width)) => (height, width),
            _ => return Err(GraphError::invalid_input("grid has no columns")),
        };

        let cells = Array2::from_shape_vec((dims.0.get(), dims.1.get()), rows.into_iter().flatten().collect_vec())
            .map_err(|e| GraphError::invalid_input(e.to_string()))?;

        Ok(Self { dims, cells })
    }

    /// The extent of this grid as `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The cell at `location`, or [`None`] if it is out of bounds.
    pub fn get(&self, location: Location) -> Option<Cell> {
        self.cells.get(location.as_index()).copied()
    }

    /// Every cell together with its location, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Location, Cell)> + '_ {
        self.cells.indexed_iter().map(|(index, cell)| (Location::from(index), *cell))
    }

    /// Render this grid with the open cells along `path` drawn as `.`.
    ///
    /// Named cells and obstacles keep their label so endpoints stay readable.
    pub fn render_path(&self, path: &[Location]) -> String {
        let on_path: HashSet<&Location> = path.iter().collect();
        print(self.cells.indexed_iter().fold(Array2::from_elem(self.cells.raw_dim(), ' '), |mut out, (index, cell)| {
            out[index] = match cell {
                Cell::Open if on_path.contains(&Location::from(index)) => '.',
                _ => cell.label(),
            };
            out
        }))
    }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

impl FromStr for CellGrid {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(&s.lines().collect_vec())
    }
}

impl Display for CellGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.cells.map(Cell::label)))
    }
}
