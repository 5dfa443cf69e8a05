//! Boundary growth: traces a whole 4-connected component by repeatedly
//! pushing the loop outward around adjacent unprocessed cells.
//!
//! The loop starts as the unit square of the seed cell. Each edge is
//! checked for an unprocessed cell on either side (in the order given by
//! [`Direction::probe_order`]); when one is found the cell is labeled and
//! the edge is replaced by the three edges walking around that cell, and
//! those are examined next. Edges already settled never need a second look
//! because cells only ever go from unprocessed to labeled, so the loop is
//! built with a pending stack and an append-only output in time linear in
//! the component size.

use crate::{
    algorithms::segment::{Direction, EdgeLoop, Segment},
    error::{MaskError, Result},
    grid::RegionGrid,
};

/// Grow the boundary of the component containing `(row, col)`, labeling
/// every absorbed cell with `region_id`.
pub fn grow(grid: &mut RegionGrid, row: usize, col: usize, region_id: i32) -> Result<EdgeLoop> {
    let (seed_row, seed_col) = lattice_coords(row, col)?;
    grid.mark(row, col, region_id)?;

    // top of the stack is the next edge in loop order
    let mut pending = EdgeLoop::unit_square(seed_row, seed_col).segments;
    pending.reverse();
    let mut settled = Vec::with_capacity(pending.len());

    while let Some(segment) = pending.pop() {
        match absorbable_neighbor(grid, &segment) {
            Some((side, (cell_row, cell_col))) => {
                grid.mark(cell_row as usize, cell_col as usize, region_id)?;
                pending.extend(segment.detour(side).into_iter().rev());
            }
            None => settled.push(segment),
        }
    }

    Ok(EdgeLoop { segments: settled })
}

/// First side of `segment` whose cell is still unprocessed
fn absorbable_neighbor(grid: &RegionGrid, segment: &Segment) -> Option<(Direction, (i32, i32))> {
    segment
        .direction
        .probe_order()
        .into_iter()
        .map(|side| (side, segment.adjacent_cell(side)))
        .find(|&(_, (row, col))| grid.is_unprocessed(row, col))
}

fn lattice_coords(row: usize, col: usize) -> Result<(i32, i32)> {
    match (i32::try_from(row), i32::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(MaskError::InvariantViolation(format!(
            "seed ({row}, {col}) does not fit the corner lattice"
        ))),
    }
}
