use log::{debug, trace};
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CoordinateSmallVec};
use crate::grid::{Grid, GridError, IndexType};

/// The corner where carving starts by default, `(width - 1, 0)`.
/// Solving enters the maze at the same corner.
pub fn entry_corner<GridIndexType>(grid: &Grid<GridIndexType>) -> Option<Cartesian2DCoordinate>
    where GridIndexType: IndexType
{
    if grid.is_empty() {
        None
    } else {
        Some(Cartesian2DCoordinate::new((grid.width() - 1) as u32, 0))
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid, starting
/// from the entry corner.
/// An empty grid is left as it is.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                               rng: &mut R)
                                               -> Result<(), GridError>
    where GridIndexType: IndexType,
          R: Rng
{
    match entry_corner(grid) {
        Some(start) => recursive_backtracker_from(grid, start, rng),
        None => {
            debug!("Nothing to carve on an empty {}x{} grid", grid.width(), grid.height());
            Ok(())
        }
    }
}

/// Recursive backtracker from a given start cell.
///
/// A random walk that carves a passage into a random unvisited neighbour of the current cell. When the
/// walk is boxed in by visited cells it backs up along the cells it has carved through until it finds
/// one with an unvisited neighbour, and walks on from there. When it has backed all the way out of
/// the start cell every cell has been visited once and the passages form a spanning tree: a perfect
/// maze with `size - 1` passages.
///
/// The "recursion" is an explicit stack so very large grids cannot overflow the call stack.
/// The grid is expected to be fully walled with no visited cells, see `Grid::reset`.
pub fn recursive_backtracker_from<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                                    start: Cartesian2DCoordinate,
                                                    rng: &mut R)
                                                    -> Result<(), GridError>
    where GridIndexType: IndexType,
          R: Rng
{
    if grid.is_empty() {
        return Ok(());
    }
    if !grid.is_valid_coordinate(start) {
        return Err(GridError::InvalidGridCoordinate);
    }

    let mut stack: Vec<Cartesian2DCoordinate> = Vec::with_capacity(grid.size());
    let mut current = start;
    let mut carved = 0;

    loop {
        grid.visit(current);

        let unvisited_neighbours = grid.wall_neighbours(current)
            .into_iter()
            .filter(|neighbour| !grid.is_visited(*neighbour))
            .collect::<CoordinateSmallVec>();

        if !unvisited_neighbours.is_empty() {
            let next = unvisited_neighbours[rng.gen::<usize>() % unvisited_neighbours.len()];
            grid.open_edge(current, next)?;
            carved += 1;
            trace!("carved {:?} -> {:?}", current, next);

            stack.push(current);
            current = next;
        } else if let Some(waiting) = stack.pop() {
            current = waiting;
        } else {
            break;
        }
    }

    debug!("Carved {} passages through a {}x{} grid from {:?}",
           carved, grid.width(), grid.height(), start);
    Ok(())
}
