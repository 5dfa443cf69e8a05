pub mod segment;
pub mod growth;
pub mod canonical;
pub mod vertices;
pub mod preprocessing;

pub use segment::{Direction, EdgeLoop, Segment};
pub use growth::grow;
pub use canonical::canonicalize;
pub use vertices::extract_vertices;
pub use preprocessing::*;

use tracing::debug;

use crate::{
    error::{MaskError, Result},
    grid::{Mask, RegionGrid},
    traits::PolygonExtractor,
    types::{Polygon, TracedOutline},
};

/// Traces every 4-connected foreground component of a mask into a polygon.
///
/// Components are discovered in row-major order of their first cell and
/// each one is grown to completion before the next seed is chosen.
#[derive(Debug, Clone)]
pub struct PolygonTracer {
    /// Collapse runs of same-direction edges into single polygon sides
    pub merge_collinear: bool,
}

impl Default for PolygonTracer {
    fn default() -> Self {
        Self { merge_collinear: true }
    }
}

impl PolygonTracer {
    pub fn new(merge_collinear: bool) -> Self {
        Self { merge_collinear }
    }

    /// Trace all components of `mask`
    pub fn trace(&self, mask: &Mask) -> Result<TracedOutline> {
        self.trace_labeled(mask).map(|(outline, _)| outline)
    }

    /// Trace all components and also return the final region grid, in which
    /// every foreground cell holds the id of the polygon that absorbed it.
    pub fn trace_labeled(&self, mask: &Mask) -> Result<(TracedOutline, RegionGrid)> {
        let mut grid = RegionGrid::initialize(mask);
        let mut polygons = Vec::new();
        let mut region_id: i32 = 0;

        while let Some((row, col)) = grid.find_next_unprocessed() {
            region_id = region_id.checked_add(1).ok_or_else(|| {
                MaskError::InvariantViolation("region id counter overflowed".to_string())
            })?;
            polygons.push(self.trace_component(&mut grid, row, col, region_id)?);
        }

        debug!(
            polygons = polygons.len(),
            width = mask.width(),
            height = mask.height(),
            "traced mask"
        );

        let outline = TracedOutline {
            polygons,
            width: mask.width(),
            height: mask.height(),
        };
        Ok((outline, grid))
    }

    fn trace_component(
        &self,
        grid: &mut RegionGrid,
        row: usize,
        col: usize,
        region_id: i32,
    ) -> Result<Polygon> {
        let raw = grow(grid, row, col, region_id)?;
        let raw_edges = raw.len();
        let edges = canonicalize(raw)?;
        let polygon = extract_vertices(&edges, region_id, self.merge_collinear);

        debug!(
            region_id,
            seed_row = row,
            seed_col = col,
            raw_edges,
            edges = edges.len(),
            vertices = polygon.len(),
            "traced component"
        );
        Ok(polygon)
    }
}

impl PolygonExtractor for PolygonTracer {
    fn extract_polygons(&self, mask: &Mask) -> Result<TracedOutline> {
        self.trace(mask)
    }
}
