//! **labyrinth** generates perfect mazes on rectangular grids and finds routes through them.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grids;
pub mod pathing;
pub mod units;
mod utils;
