use bit_set::BitSet;
use itertools::Itertools;
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Cell};
use crate::generators;
use crate::grid::{Grid, IndexType};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SearchFailure {
    /// The entry or exit is outside the grid.
    OutOfBounds,
    /// Every cell reachable from the entry was expanded without finding the exit.
    NoPath,
    /// Gave up after the configured number of expansions.
    MaxExpansionsExceeded,
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match *self {
            SearchFailure::OutOfBounds => "search entry or exit is outside the grid",
            SearchFailure::NoPath => "no passage leads from the entry to the exit",
            SearchFailure::MaxExpansionsExceeded => "search expansion limit reached",
        };
        f.write_str(description)
    }
}

impl Error for SearchFailure {}

/// The corner where solving leaves the maze by default, `(0, height - 1)`.
pub fn exit_corner<GridIndexType>(grid: &Grid<GridIndexType>) -> Option<Cartesian2DCoordinate>
    where GridIndexType: IndexType
{
    if grid.is_empty() {
        None
    } else {
        Some(Cartesian2DCoordinate::new(0, (grid.height() - 1) as u32))
    }
}

/// Best first search through the passages of a grid.
///
/// Each step expands the frontier cell with the lowest `f = g + h`, where `g` is the number of steps
/// back to the entry and `h` the straight line distance to the exit. Ties go to the cell that joined
/// the frontier first. The search stops as soon as the exit shows up as a neighbour of the cell
/// being expanded.
///
/// A cell on the frontier is never re-parented. With unit steps through a perfect maze there is only
/// one route to any cell so nothing shorter can turn up later.
#[derive(Debug, Copy, Clone, Default)]
pub struct PathFinder {
    max_expansions: Option<usize>,
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    /// Give up once this many cells have been expanded.
    pub fn with_max_expansions(self, max_expansions: usize) -> PathFinder {
        PathFinder { max_expansions: Some(max_expansions) }
    }

    #[inline]
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Find a path from `entry` to `exit`, entry first.
    ///
    /// Leaves each reached cell's parent and priority score on the grid, replacing those of any
    /// earlier search.
    pub fn find<GridIndexType>(&self,
                               grid: &mut Grid<GridIndexType>,
                               entry: Cartesian2DCoordinate,
                               exit: Cartesian2DCoordinate)
                               -> Result<Vec<Cartesian2DCoordinate>, SearchFailure>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(entry) || !grid.is_valid_coordinate(exit) {
            debug!("Search from {:?} to {:?} is outside a {}x{} grid",
                   entry, exit, grid.width(), grid.height());
            return Err(SearchFailure::OutOfBounds);
        }

        grid.reset_search();

        if entry == exit {
            return Ok(vec![entry]);
        }

        let width = grid.width();
        let cell_index = |coord: Cartesian2DCoordinate| coord.y as usize * width + coord.x as usize;

        let mut open: Vec<Cartesian2DCoordinate> = vec![entry];
        let mut in_open = BitSet::with_capacity(grid.size());
        let mut closed = BitSet::with_capacity(grid.size());
        in_open.insert(cell_index(entry));

        let mut current = entry;
        let mut expansions = 0;

        while !open.is_empty() {

            if let Some(max) = self.max_expansions {
                if expansions >= max {
                    warn!("Gave up searching for {:?} after {} expansions", exit, expansions);
                    return Err(SearchFailure::MaxExpansionsExceeded);
                }
            }
            expansions += 1;
            trace!("expanding {:?}, frontier size {}", current, open.len());

            let current_path_length = grid.cell(current).map_or(0, Cell::path_length);

            for neighbour in grid.open_neighbours(current) {

                if neighbour == exit {
                    if let Some(cell) = grid.cell_mut(neighbour) {
                        cell.set_parent(current, current_path_length + 1);
                    }
                    let path = grid.path_to_origin(exit).ok_or(SearchFailure::NoPath)?;
                    debug!("Found a {} cell path from {:?} to {:?} after {} expansions",
                           path.len(), entry, exit, expansions);
                    return Ok(path);
                }

                let neighbour_index = cell_index(neighbour);
                if !closed.contains(neighbour_index) && !in_open.contains(neighbour_index) {
                    open.push(neighbour);
                    in_open.insert(neighbour_index);

                    let path_length = current_path_length + 1;
                    let score = f64::from(path_length) + neighbour.distance(exit);
                    if let Some(cell) = grid.cell_mut(neighbour) {
                        cell.set_parent(current, path_length);
                        cell.set_heuristic_score(score);
                    }
                }
            }

            let current_index = cell_index(current);
            closed.insert(current_index);
            in_open.remove(current_index);
            if let Some(position) = open.iter().position(|coord| *coord == current) {
                open.remove(position);
            }

            let next_position = open.iter().position_min_by(|a, b| {
                let score = |coord: Cartesian2DCoordinate| {
                    grid.cell(coord).map_or(f64::INFINITY, Cell::heuristic_score)
                };
                score(**a).partial_cmp(&score(**b)).unwrap_or(Ordering::Equal)
            });
            match next_position {
                Some(position) => current = open[position],
                None => break,
            }
        }

        debug!("No path from {:?} to {:?}, {} cells expanded", entry, exit, expansions);
        Err(SearchFailure::NoPath)
    }
}

/// Path from `entry` to `exit` through the grid's passages, None if there is no such path.
pub fn solve<GridIndexType>(grid: &mut Grid<GridIndexType>,
                            entry: Cartesian2DCoordinate,
                            exit: Cartesian2DCoordinate)
                            -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType
{
    PathFinder::new().find(grid, entry, exit).ok()
}

/// Solve from the entry corner `(width - 1, 0)` to the exit corner `(0, height - 1)`.
pub fn solve_maze<GridIndexType>(grid: &mut Grid<GridIndexType>) -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType
{
    match (generators::entry_corner(grid), exit_corner(grid)) {
        (Some(entry), Some(exit)) => solve(grid, entry, exit),
        _ => None,
    }
}
