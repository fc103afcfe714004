use smallvec::SmallVec;
use std::convert::From;

use crate::units::Width;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(w) = width;
        Cartesian2DCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    /// Straight line distance between two coordinates.
    pub fn distance(&self, other: Cartesian2DCoordinate) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// True if the coordinates differ by exactly one step along one axis.
    pub fn is_adjacent(&self, other: Cartesian2DCoordinate) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx + dy == 1
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Directions away from a cell. North is towards `y == 0`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Up, right, down, left. Neighbour queries and the search tie breaks follow this order.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// Creates a new coordinate offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable, it may still be outside a grid.
    pub fn offset(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

/// A grid node.
///
/// The parent is a coordinate handle into the owning grid, never a pointer, so parent chains cannot
/// form ownership cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Cartesian2DCoordinate,
    visited: bool,
    parent: Option<Cartesian2DCoordinate>,
    path_length: u32,
    heuristic: f64,
}

impl Cell {
    pub fn new(coord: Cartesian2DCoordinate) -> Cell {
        Cell {
            coord,
            visited: false,
            parent: None,
            path_length: 0,
            heuristic: 0.0,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn parent(&self) -> Option<Cartesian2DCoordinate> {
        self.parent
    }

    /// Number of parent links back to the search entry, `g` in the search priority.
    #[inline]
    pub fn path_length(&self) -> u32 {
        self.path_length
    }

    /// Search priority key, `f = g + h`. Only meaningful once a search has reached this cell.
    #[inline]
    pub fn heuristic_score(&self) -> f64 {
        self.heuristic
    }

    pub(crate) fn visit(&mut self) {
        self.visited = true;
    }

    pub(crate) fn clear_visit(&mut self) {
        self.visited = false;
    }

    pub(crate) fn set_parent(&mut self, parent: Cartesian2DCoordinate, path_length: u32) {
        self.parent = Some(parent);
        self.path_length = path_length;
    }

    pub(crate) fn set_heuristic_score(&mut self, score: f64) {
        self.heuristic = score;
    }

    pub(crate) fn clear_search(&mut self) {
        self.parent = None;
        self.path_length = 0;
        self.heuristic = 0.0;
    }
}
