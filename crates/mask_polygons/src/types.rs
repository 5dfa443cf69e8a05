use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use geo_types::{Coord, LineString};

use crate::algorithms::segment::Direction;

/// A corner of the pixel lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct Vertex {
    pub row: i32,
    pub col: i32,
}

impl Vertex {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighboring corner one unit step away
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Rectilinear boundary of one connected region.
///
/// Vertices are stored open: the closing edge from the last vertex back to
/// the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Polygon {
    /// Id of the region in the label grid this polygon bounds
    pub region_id: i32,
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices with the first one repeated at the end
    pub fn closed_vertices(&self) -> Vec<Vertex> {
        let mut ring = self.vertices.clone();
        if let Some(&first) = self.vertices.first() {
            ring.push(first);
        }
        ring
    }

    /// Length of the boundary in lattice units
    pub fn perimeter(&self) -> u64 {
        let closed = self.closed_vertices();
        closed
            .windows(2)
            .map(|pair| {
                u64::from(pair[0].row.abs_diff(pair[1].row)) + u64::from(pair[0].col.abs_diff(pair[1].col))
            })
            .sum()
    }

    /// Lowest and highest corner touched by the polygon
    pub fn bounding_box(&self) -> Option<(Vertex, Vertex)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Vertex::new(min.row.min(v.row), min.col.min(v.col)),
                Vertex::new(max.row.max(v.row), max.col.max(v.col)),
            )
        }))
    }

    /// Convert to geo-types Polygon (x = column, y = row)
    pub fn to_geo_polygon(&self) -> geo_types::Polygon<f64> {
        let exterior: Vec<Coord<f64>> = self
            .closed_vertices()
            .iter()
            .map(|v| Coord {
                x: f64::from(v.col),
                y: f64::from(v.row),
            })
            .collect();

        geo_types::Polygon::new(LineString::new(exterior), vec![])
    }
}

/// All polygons traced from one mask, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TracedOutline {
    pub polygons: Vec<Polygon>,
    /// Mask dimensions in cells
    pub width: usize,
    pub height: usize,
}

impl TracedOutline {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> Polygon {
        Polygon {
            region_id: 1,
            vertices: vec![
                Vertex::new(2, 0),
                Vertex::new(2, 3),
                Vertex::new(0, 3),
                Vertex::new(0, 0),
            ],
        }
    }

    #[test]
    fn test_closed_vertices_repeat_first() {
        let ring = rectangle().closed_vertices();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_perimeter_and_bounds() {
        let polygon = rectangle();
        assert_eq!(polygon.perimeter(), 10);
        assert_eq!(
            polygon.bounding_box(),
            Some((Vertex::new(0, 0), Vertex::new(2, 3)))
        );
    }

    #[test]
    fn test_geo_polygon_area() {
        use geo::Area;
        let geo_polygon = rectangle().to_geo_polygon();
        assert_eq!(geo_polygon.unsigned_area(), 6.0);
        assert_eq!(geo_polygon.exterior().0[1], Coord { x: 3.0, y: 2.0 });
    }
}
