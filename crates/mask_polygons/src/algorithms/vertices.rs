use crate::{
    algorithms::segment::EdgeLoop,
    types::{Polygon, Vertex},
};

/// Collapse a canonical edge loop into polygon vertices.
///
/// Each vertex is the end corner of an edge. With `merge_collinear`, a run
/// of same-direction edges contributes only its final corner, giving one
/// vertex per side of the rectilinear polygon.
pub fn extract_vertices(edges: &EdgeLoop, region_id: i32, merge_collinear: bool) -> Polygon {
    let mut vertices: Vec<Vertex> = Vec::with_capacity(edges.len());
    let mut last_direction = None;

    for segment in &edges.segments {
        let end = segment.end();
        match vertices.last_mut() {
            Some(last) if merge_collinear && last_direction == Some(segment.direction) => {
                *last = end;
            }
            _ => vertices.push(end),
        }
        last_direction = Some(segment.direction);
    }

    Polygon { region_id, vertices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::segment::{Direction::*, Segment};

    fn strip() -> EdgeLoop {
        EdgeLoop {
            segments: vec![
                Segment::new(0, 0, Up),
                Segment::new(1, 0, Right),
                Segment::new(1, 1, Right),
                Segment::new(1, 2, Down),
                Segment::new(0, 2, Left),
                Segment::new(0, 1, Left),
            ],
        }
    }

    #[test]
    fn test_runs_collapse_to_corners() {
        let polygon = extract_vertices(&strip(), 3, true);

        assert_eq!(polygon.region_id, 3);
        assert_eq!(
            polygon.vertices,
            vec![
                Vertex { row: 1, col: 0 },
                Vertex { row: 1, col: 2 },
                Vertex { row: 0, col: 2 },
                Vertex { row: 0, col: 0 },
            ]
        );
    }

    #[test]
    fn test_unmerged_keeps_every_corner() {
        let polygon = extract_vertices(&strip(), 1, false);
        assert_eq!(polygon.len(), 6);
        assert_eq!(polygon.vertices[1], Vertex { row: 1, col: 1 });
    }

    #[test]
    fn test_unit_square_has_four_vertices() {
        let polygon = extract_vertices(&EdgeLoop::unit_square(0, 0), 1, true);
        assert_eq!(
            polygon.vertices,
            vec![
                Vertex { row: 1, col: 0 },
                Vertex { row: 1, col: 1 },
                Vertex { row: 0, col: 1 },
                Vertex { row: 0, col: 0 },
            ]
        );
    }
}
