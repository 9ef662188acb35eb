//! Sight-window enumeration and nearest-food search

use ordered_float::OrderedFloat;

use crate::core::error::Result;
use crate::core::types::Coord;
use crate::grid::Grid;

/// All in-bounds cells within Chebyshev `sight_range` of `from`, the cell
/// under the observer included
///
/// Enumeration is row-major within the clipped window, which makes every
/// downstream tie-break deterministic.
pub fn visible_cells(grid: &Grid, from: Coord, sight_range: i32) -> Vec<Coord> {
    let x_min = (from.x - sight_range).max(0);
    let x_max = (from.x + sight_range).min(grid.width() - 1);
    let y_min = (from.y - sight_range).max(0);
    let y_max = (from.y + sight_range).min(grid.height() - 1);

    let mut cells = Vec::with_capacity(((x_max - x_min + 1) * (y_max - y_min + 1)) as usize);
    for y in y_min..=y_max {
        for x in x_min..=x_max {
            cells.push(Coord::new(x, y));
        }
    }
    cells
}

/// Nearest visible cell holding a strictly positive amount of plants
///
/// Candidates are ordered by ascending Euclidean distance from `from`; the
/// stable sort preserves row-major order among equidistant cells. Food
/// outside the sight window is never considered. A visible cell whose
/// vegetation was never initialized is a map-setup violation and surfaces
/// as an error rather than being skipped.
pub fn find_plants(grid: &Grid, from: Coord, sight_range: i32) -> Result<Option<Coord>> {
    let mut cells = visible_cells(grid, from, sight_range);
    cells.sort_by_key(|&c| OrderedFloat(grid.dist(from, c)));

    for cell in cells {
        if grid.node(cell)?.plants()?.amount > 0.0 {
            return Ok(Some(cell));
        }
    }
    Ok(None)
}
