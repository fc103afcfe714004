use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use rand::Rng;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::rc::Rc;
use std::slice;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, CoordinateSmallVec};
use crate::grid_displays::GridDisplay;
use crate::units::{EdgesCount, Height, NodesCount, Width};

/// A rectangular grid of cells. Passages between cells are the edges of an undirected graph whose node
/// weights are the cells, stored in row major order.
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<Cell, (), Undirected, GridIndexType>,
    width: Width,
    height: Height,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match *self {
            GridError::InvalidGridCoordinate => "coordinate is outside the grid",
            GridError::SelfLink => "a cell cannot be linked to itself",
            GridError::NotAdjacent => "only orthogonally adjacent cells can be linked",
        };
        f.write_str(description)
    }
}

impl Error for GridError {}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, width: {:?}, height: {:?}",
               self.graph, self.width, self.height)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// A fully walled grid. A zero width or height gives an empty grid.
    ///
    /// Panics if the cell count does not fit in `GridIndexType`, see `grids` for checked constructors.
    pub fn new(width: Width, height: Height) -> Grid<GridIndexType> {

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size(width, height);

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            width,
            height,
            grid_display: None,
        };
        for index in 0..nodes {
            let _ = grid.graph.add_node(Cell::new(Cartesian2DCoordinate::from_row_major_index(index, width)));
        }

        grid
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height.0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    pub fn open_edges_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Option<Cartesian2DCoordinate> {
        if self.is_empty() {
            None
        } else {
            let index = rng.gen::<usize>() % self.size();
            Some(Cartesian2DCoordinate::from_row_major_index(index, self.width))
        }
    }

    /// The cell at `x`, `y` or None if that is outside the grid.
    pub fn cell_at(&self, x: isize, y: isize) -> Option<&Cell> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.cell(Cartesian2DCoordinate::new(x, y)),
            _ => None,
        }
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_graph_index(coord)
            .and_then(|index| self.graph.node_weight(index))
    }

    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_graph_index(coord) {
            Some(index) => self.graph.node_weight_mut(index),
            None => None,
        }
    }

    /// Open a passage between two adjacent cells. Opening an existing passage is a no-op.
    pub fn open_edge(&mut self,
                     a: Cartesian2DCoordinate,
                     b: Cartesian2DCoordinate)
                     -> Result<(), GridError> {
        if a == b {
            return Err(GridError::SelfLink);
        }
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if !a.is_adjacent(b) {
                    return Err(GridError::NotAdjacent);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(GridError::InvalidGridCoordinate),
        }
    }

    /// Wall up a passage, if the grid coordinates are valid and a passage exists between them.
    /// Returns true if a passage was closed.
    pub fn close_edge(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Invalidates the last edge index, none are kept around.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Wall up every passage in the grid.
    pub fn close_all_edges(&mut self) {
        self.graph.clear_edges();
    }

    /// Is there a passage between the two cells? False if either cell is outside the grid or the
    /// cells are not adjacent.
    pub fn is_open(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        if !a.is_adjacent(b) {
            return false;
        }
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_open(coord, neighbour_coord))
    }

    /// Cells to the North, East, South and West (in that order) of a cell, but not
    /// necessarily joined to it by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        direction.offset(coord)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Neighbours reachable through a passage.
    pub fn open_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour_coord| self.is_open(coord, *neighbour_coord))
            .collect()
    }

    /// Neighbours behind a wall.
    pub fn wall_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour_coord| !self.is_open(coord, *neighbour_coord))
            .collect()
    }

    /// Mark a cell visited. Returns false if the coordinate is outside the grid.
    pub fn visit(&mut self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_mut(coord).map(|cell| cell.visit()).is_some()
    }

    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_visited)
    }

    pub fn reset_visits(&mut self) {
        for cell in self.graph.node_weights_mut() {
            cell.clear_visit();
        }
    }

    /// Forget parents and priority scores from any previous search.
    pub fn reset_search(&mut self) {
        for cell in self.graph.node_weights_mut() {
            cell.clear_search();
        }
    }

    /// Back to a fully walled, unvisited grid.
    pub fn reset(&mut self) {
        self.close_all_edges();
        self.reset_visits();
        self.reset_search();
    }

    /// The parent chain of a cell, root first and ending with the cell itself.
    /// None if the coordinate is outside the grid.
    pub fn path_to_origin(&self, coord: Cartesian2DCoordinate) -> Option<Vec<Cartesian2DCoordinate>> {
        let mut path = vec![self.cell(coord)?.coordinate()];
        let mut parent = self.cell(coord).and_then(Cell::parent);

        // A chain can never be longer than the grid, stops a corrupted chain looping forever.
        while let Some(parent_coord) = parent {
            if path.len() > self.size() {
                break;
            }
            path.push(parent_coord);
            parent = self.cell(parent_coord).and_then(Cell::parent);
        }
        path.reverse();

        Some(path)
    }

    /// Number of parent links from a cell back to its root.
    pub fn parent_chain_length(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.path_to_origin(coord).map(|path| path.len() - 1)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Cell coordinates in row major order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            width: self.width,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    /// Every passage in the grid, once each.
    pub fn iter_open_edges(&self) -> OpenEdgesIter<GridIndexType> {
        OpenEdgesIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            width: self.width,
        }
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

fn graph_size(width: Width, height: Height) -> (NodesCount, EdgesCount) {
    let cells_count = width.0 * height.0;
    // A perfect maze is a spanning tree.
    (NodesCount(cells_count), EdgesCount(cells_count.saturating_sub(1)))
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a, GridIndexType: IndexType> IntoIterator for &'a Grid<GridIndexType> {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct OpenEdgesIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    width: Width,
}

impl<'a, GridIndexType: IndexType> Iterator for OpenEdgesIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                             self.width);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                             self.width);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for OpenEdgesIter<'a, GridIndexType> {}

impl<'a, GridIndexType: IndexType> fmt::Debug for OpenEdgesIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OpenEdgesIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::grids::{small_rect_grid, SmallRectangularGrid};

    fn small_grid(w: usize, h: usize) -> SmallRectangularGrid {
        small_rect_grid(Width(w), Height(h)).expect("grid dimensions too large for small grid")
    }

    // SmallVec derefs to a slice, compare through that.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let neighbours = g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // outside the grid has no neighbours at all
        check_expected_neighbours(gc(10, 3), &[]);
    }

    #[test]
    fn neighbours_are_up_right_down_left() {
        let g = small_grid(3, 3);
        assert_smallvec_eq!(g.neighbours(gc(1, 1)), &[gc(1, 0), gc(2, 1), gc(1, 2), gc(0, 1)]);
        assert_smallvec_eq!(g.neighbours(gc(2, 0)), &[gc(2, 1), gc(1, 0)]);
        assert_smallvec_eq!(g.neighbours(gc(0, 2)), &[gc(0, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(0, 1)));
    }

    #[test]
    fn grid_size() {
        let g = small_grid(10, 12);
        assert_eq!(g.size(), 120);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 12);
        assert_eq!(g.open_edges_count(), 0);
    }

    #[test]
    fn empty_grid() {
        let g = small_grid(0, 5);
        assert!(g.is_empty());
        assert_eq!(g.iter().count(), 0);
        assert!(g.cell_at(0, 0).is_none());
        assert!(g.neighbours(gc(0, 0)).is_empty());
        let mut rng = XorShiftRng::seed_from_u64(3);
        assert_eq!(g.random_cell(&mut rng), None);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn cell_at_bounds() {
        let g = small_grid(4, 3);
        assert!(g.cell_at(-1, 0).is_none());
        assert!(g.cell_at(0, -1).is_none());
        assert!(g.cell_at(4, 0).is_none());
        assert!(g.cell_at(0, 3).is_none());
        assert!(g.cell_at(isize::MIN, isize::MAX).is_none());
        assert_eq!(g.cell_at(3, 2).map(Cell::coordinate), Some(gc(3, 2)));
        assert_eq!(g.cell_at(0, 0).map(Cell::coordinate), Some(gc(0, 0)));
    }

    #[test]
    fn random_cell() {
        let g = small_grid(4, 5);
        let mut rng = XorShiftRng::seed_from_u64(17);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng).expect("grid is not empty");
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
        assert_eq!(g.iter().len(), 4);
    }

    #[test]
    fn cells_know_their_coordinates() {
        let g = small_grid(3, 4);
        for coord in &g {
            let cell = g.cell(coord).expect("iterated coordinate is in the grid");
            assert_eq!(cell.coordinate(), coord);
            assert!(!cell.is_visited());
            assert_eq!(cell.parent(), None);
        }
    }

    #[test]
    fn opening_cells() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 1);
        let b = gc(0, 2);
        let c = gc(0, 3);

        let sorted_open = |grid: &SmallRectangularGrid, coord| -> Vec<Cartesian2DCoordinate> {
            grid.open_neighbours(coord).iter().cloned().sorted().collect()
        };
        macro_rules! open_sorted {
            ($x:expr) => (sorted_open(&g, $x))
        }

        // Testing that the order of the arguments to `is_open` does not matter
        macro_rules! bi_check_open {
            ($x:expr, $y:expr) => (g.is_open($x, $y) && g.is_open($y, $x))
        }

        assert!(!bi_check_open!(a, b));
        assert!(!bi_check_open!(b, c));
        assert_eq!(open_sorted!(a), vec![]);
        assert_eq!(g.wall_neighbours(b).len(), 3);

        g.open_edge(a, b).expect("open failed");
        assert!(bi_check_open!(a, b));
        assert_eq!(open_sorted!(a), vec![b]);
        assert_eq!(open_sorted!(b), vec![a]);
        assert!(g.is_neighbour_open(a, CompassPrimary::South));
        assert!(g.is_neighbour_open(b, CompassPrimary::North));
        assert!(!g.wall_neighbours(a).contains(&b));

        g.open_edge(b, c).expect("open failed");
        assert!(bi_check_open!(a, b));
        assert!(bi_check_open!(b, c));
        assert!(!bi_check_open!(a, c));
        assert_eq!(open_sorted!(b), vec![a, c]);
        assert_eq!(g.wall_neighbours(b).into_iter().collect::<Vec<_>>(), vec![gc(1, 2)]);
        assert_eq!(g.open_edges_count(), 2);

        assert!(g.close_edge(a, b));
        assert!(!bi_check_open!(a, b));
        assert!(bi_check_open!(b, c));
        assert_eq!(open_sorted!(a), vec![]);
        assert_eq!(open_sorted!(b), vec![c]);
        assert!(!g.close_edge(a, b));

        g.close_all_edges();
        assert_eq!(g.open_edges_count(), 0);
        assert!(!bi_check_open!(b, c));
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 0);
        assert_eq!(g.open_edge(a, a), Err(GridError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let result = g.open_edge(gc(3, 3), gc(4, 3));
        assert_eq!(result, Err(GridError::InvalidGridCoordinate));
        assert!(!g.is_open(gc(3, 3), gc(4, 3)));
    }

    #[test]
    fn no_links_between_distant_cells() {
        let mut g = small_grid(4, 4);
        assert_eq!(g.open_edge(gc(0, 0), gc(1, 1)), Err(GridError::NotAdjacent));
        assert_eq!(g.open_edge(gc(0, 0), gc(0, 2)), Err(GridError::NotAdjacent));
        assert!(!g.is_open(gc(0, 0), gc(1, 1)));
        assert_eq!(g.open_edges_count(), 0);
    }

    #[test]
    fn no_parallel_duplicated_open_edges() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 0);
        let b = gc(0, 1);
        g.open_edge(a, b).expect("open failed");
        g.open_edge(b, a).expect("open failed");
        assert_smallvec_eq!(g.open_neighbours(a), &[b]);
        assert_smallvec_eq!(g.open_neighbours(b), &[a]);
        assert_eq!(g.iter_open_edges().len(), 1);
        assert_eq!(g.iter_open_edges().collect::<Vec<_>>(), vec![(a, b)]);
    }

    #[test]
    fn visits() {
        let mut g = small_grid(2, 2);
        assert!(g.visit(gc(1, 1)));
        assert!(!g.visit(gc(2, 2)));
        assert!(g.is_visited(gc(1, 1)));
        assert!(!g.is_visited(gc(0, 1)));
        g.reset_visits();
        assert!(!g.is_visited(gc(1, 1)));
    }

    #[test]
    fn parent_chains() {
        let mut g = small_grid(3, 1);
        g.cell_mut(gc(1, 0)).expect("in grid").set_parent(gc(0, 0), 1);
        g.cell_mut(gc(2, 0)).expect("in grid").set_parent(gc(1, 0), 2);

        assert_eq!(g.path_to_origin(gc(2, 0)), Some(vec![gc(0, 0), gc(1, 0), gc(2, 0)]));
        assert_eq!(g.parent_chain_length(gc(2, 0)), Some(2));
        assert_eq!(g.path_to_origin(gc(0, 0)), Some(vec![gc(0, 0)]));
        assert_eq!(g.path_to_origin(gc(3, 0)), None);

        g.reset_search();
        assert_eq!(g.parent_chain_length(gc(2, 0)), Some(0));
    }

    #[test]
    fn quickcheck_cell_at_boundary_safety() {
        fn prop(w: u8, h: u8, x: i16, y: i16) -> TestResult {
            let (w, h) = ((w % 16) as usize, (h % 16) as usize);
            let g = small_grid(w, h);
            let inside = x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;
            match g.cell_at(x as isize, y as isize) {
                Some(cell) => TestResult::from_bool(inside &&
                                                    cell.coordinate() == gc(x as u32, y as u32)),
                None => TestResult::from_bool(!inside),
            }
        }
        quickcheck(prop as fn(u8, u8, i16, i16) -> TestResult);
    }

    #[test]
    fn quickcheck_is_open_symmetry() {
        fn prop(links: Vec<(u8, bool)>) -> bool {
            let mut g = small_grid(5, 5);
            for (index, horizontal) in &links {
                let a = Cartesian2DCoordinate::from_row_major_index(*index as usize % 25, Width(5));
                let dir = if *horizontal { CompassPrimary::East } else { CompassPrimary::South };
                if let Some(b) = g.neighbour_at_direction(a, dir) {
                    g.open_edge(a, b).expect("adjacent cells in the grid");
                }
            }
            let coords = g.iter().collect::<Vec<_>>();
            coords.iter()
                .cartesian_product(coords.iter())
                .all(|(a, b)| g.is_open(*a, *b) == g.is_open(*b, *a))
        }
        quickcheck(prop as fn(Vec<(u8, bool)>) -> bool);
    }
}
