use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::types::Vertex;

/// Direction of a unit edge on the corner lattice.
///
/// The row axis increases "upward": `Up` adds one to the row coordinate and
/// `Down` subtracts one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// `(Δrow, Δcol)` of one step in this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (0, 1),
            Self::Down => (-1, 0),
            Self::Left => (0, -1),
            Self::Up => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
        }
    }

    pub const fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Right, Self::Left)
                | (Self::Left, Self::Right)
                | (Self::Up, Self::Down)
                | (Self::Down, Self::Up)
        )
    }

    /// Sides probed for absorbable cells, in order of preference.
    pub(crate) const fn probe_order(self) -> [Self; 2] {
        match self {
            Self::Right | Self::Left => [Self::Up, Self::Down],
            Self::Down => [Self::Right, Self::Left],
            Self::Up => [Self::Left, Self::Right],
        }
    }
}

/// A directed unit edge starting at a lattice corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vertex,
    pub direction: Direction,
}

impl Segment {
    pub const fn new(row: i32, col: i32, direction: Direction) -> Self {
        Self {
            start: Vertex { row, col },
            direction,
        }
    }

    pub fn end(&self) -> Vertex {
        self.start.step(self.direction)
    }

    /// The cell lying on `side` of this edge, as `(row, col)` of its lower
    /// corner. `side` must be perpendicular to the edge.
    pub(crate) fn adjacent_cell(&self, side: Direction) -> (i32, i32) {
        let a = self.start;
        let b = self.end();
        let c = a.step(side);
        (a.row.min(b.row).min(c.row), a.col.min(b.col).min(c.col))
    }

    /// The three edges that walk around the cell on `side` instead of
    /// crossing this edge: out along `side`, forward, and back.
    pub(crate) fn detour(&self, side: Direction) -> [Segment; 3] {
        let out = self.start.step(side);
        let across = out.step(self.direction);
        [
            Segment { start: self.start, direction: side },
            Segment { start: out, direction: self.direction },
            Segment { start: across, direction: side.opposite() },
        ]
    }
}

/// Closed, ordered loop of unit edges around one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLoop {
    pub segments: Vec<Segment>,
}

impl EdgeLoop {
    /// Counter-clockwise loop around the single cell at `(row, col)`
    pub fn unit_square(row: i32, col: i32) -> Self {
        Self {
            segments: vec![
                Segment::new(row, col, Direction::Up),
                Segment::new(row + 1, col, Direction::Right),
                Segment::new(row + 1, col + 1, Direction::Down),
                Segment::new(row, col + 1, Direction::Left),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every edge starts where the previous one ended, including the wrap.
    pub fn is_closed(&self) -> bool {
        let Some(last) = self.segments.last() else {
            return true;
        };
        let mut previous_end = last.end();
        self.segments.iter().all(|segment| {
            let joined = segment.start == previous_end;
            previous_end = segment.end();
            joined
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_deltas_follow_upward_rows() {
        let start = Vertex { row: 2, col: 2 };
        assert_eq!(Segment { start, direction: Direction::Right }.end(), Vertex { row: 2, col: 3 });
        assert_eq!(Segment { start, direction: Direction::Down }.end(), Vertex { row: 1, col: 2 });
        assert_eq!(Segment { start, direction: Direction::Left }.end(), Vertex { row: 2, col: 1 });
        assert_eq!(Segment { start, direction: Direction::Up }.end(), Vertex { row: 3, col: 2 });
    }

    #[test]
    fn test_opposites() {
        for direction in Direction::iter() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert!(direction.is_opposite(direction.opposite()));
            assert!(!direction.is_opposite(direction));
            for side in direction.probe_order() {
                assert!(!side.is_opposite(direction) && side != direction);
            }
        }
    }

    #[test]
    fn test_unit_square_is_closed() {
        let square = EdgeLoop::unit_square(0, 0);
        assert!(square.is_closed());
        let ends: Vec<Vertex> = square.segments.iter().map(Segment::end).collect();
        assert_eq!(
            ends,
            vec![
                Vertex { row: 1, col: 0 },
                Vertex { row: 1, col: 1 },
                Vertex { row: 0, col: 1 },
                Vertex { row: 0, col: 0 },
            ]
        );
    }

    #[test]
    fn test_adjacent_cells_of_rightward_edge() {
        let segment = Segment::new(3, 5, Direction::Right);
        assert_eq!(segment.adjacent_cell(Direction::Up), (3, 5));
        assert_eq!(segment.adjacent_cell(Direction::Down), (2, 5));

        let upward = Segment::new(3, 5, Direction::Up);
        assert_eq!(upward.adjacent_cell(Direction::Left), (3, 4));
        assert_eq!(upward.adjacent_cell(Direction::Right), (3, 5));
    }

    #[test]
    fn test_detour_replaces_edge_with_same_endpoints() {
        for direction in Direction::iter() {
            let segment = Segment::new(4, 4, direction);
            for side in direction.probe_order() {
                let detour = segment.detour(side);
                assert_eq!(detour[0].start, segment.start);
                assert_eq!(detour[2].end(), segment.end());
                assert_eq!(detour[0].end(), detour[1].start);
                assert_eq!(detour[1].end(), detour[2].start);
            }
        }
    }

    #[test]
    fn test_detour_matches_known_expansion() {
        let detour = Segment::new(1, 2, Direction::Down).detour(Direction::Left);
        assert_eq!(
            detour,
            [
                Segment::new(1, 2, Direction::Left),
                Segment::new(1, 1, Direction::Down),
                Segment::new(0, 1, Direction::Right),
            ]
        );
    }
}
