//! Board grid: cells, cell centers, and path occupancy
//!
//! Towers occupy exactly one cell; the path is laid out as a chain of cells
//! joined by axis-aligned runs.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, GRID_COLS, GRID_ROWS};

/// A board cell addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// World-space center of the cell
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            self.row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }

    /// Cell containing a world-space point (pointer coordinates)
    pub fn from_point(point: Vec2) -> Self {
        Self {
            col: (point.x / CELL_SIZE).floor() as i32,
            row: (point.y / CELL_SIZE).floor() as i32,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.col) && (0..GRID_ROWS).contains(&self.row)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Check whether a cell lies on the path laid out by `cells`
///
/// Each consecutive pair of path cells spans an axis-aligned run; a cell is on
/// the path if it falls inside any run's bounding box.
pub fn is_path_cell(cells: &[GridCell], cell: GridCell) -> bool {
    match cells {
        [] => false,
        [only] => *only == cell,
        _ => cells.windows(2).any(|run| {
            let (a, b) = (run[0], run[1]);
            let (min_c, max_c) = (a.col.min(b.col), a.col.max(b.col));
            let (min_r, max_r) = (a.row.min(b.row), a.row.max(b.row));
            (min_c..=max_c).contains(&cell.col) && (min_r..=max_r).contains(&cell.row)
        }),
    }
}
