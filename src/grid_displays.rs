use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::utils;
use crate::utils::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<Cartesian2DCoordinate>,
    end_coordinates: Vec<Cartesian2DCoordinate>,
}

impl StartEndPointsDisplay {
    pub fn new(starts: Vec<Cartesian2DCoordinate>,
               ends: Vec<Cartesian2DCoordinate>)
               -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks the cells on a path, with optional S and E markers at the two ends.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
    end_points: Option<(Cartesian2DCoordinate, Cartesian2DCoordinate)>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay {
            on_path_coordinates,
            end_points: None,
        }
    }

    pub fn with_start_end_marks(path: &[Cartesian2DCoordinate]) -> Self {
        let end_points = match (path.first(), path.last()) {
            (Some(start), Some(end)) => Some((*start, *end)),
            _ => None,
        };
        PathDisplay { end_points, ..PathDisplay::new(path) }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        match self.end_points {
            Some((start, _)) if start == coord => String::from(" S "),
            Some((_, end)) if end == coord => String::from(" E "),
            _ if self.on_path_coordinates.contains(&coord) => String::from(" . "),
            _ => String::from("   "),
        }
    }
}

/// Plain ascii walls: `+---+` along the top of each row of cells and `|` between cells.
impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const WALL_UD: &str = "|";
        const OPEN_3: &str = "   ";
        const OPEN: &str = " ";

        if self.is_empty() {
            return Ok(());
        }

        // The north boundary, every other north wall is the south wall of the row above.
        let mut output = String::from(CORNER);
        for _ in 0..self.width() {
            output.push_str(WALL_LR_3);
            output.push_str(CORNER);
        }
        output.push('\n');

        let default_cell_body = String::from(OPEN_3);

        for y in 0..self.height() {
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from(CORNER);

            for x in 0..self.width() {
                let cell_coord = Cartesian2DCoordinate::new(x as u32, y as u32);

                if let Some(ref displayer) = *self.grid_display() {
                    row_middle_section_render.push_str(displayer.render_cell_body(cell_coord).as_str());
                } else {
                    row_middle_section_render.push_str(default_cell_body.as_str());
                }

                let east_open = self.is_neighbour_open(cell_coord, CompassPrimary::East);
                row_middle_section_render.push_str(if east_open { OPEN } else { WALL_UD });

                let south_open = self.is_neighbour_open(cell_coord, CompassPrimary::South);
                row_bottom_section_render.push_str(if south_open { OPEN_3 } else { WALL_LR_3 });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(row_middle_section_render.as_ref());
            output.push('\n');
            output.push_str(row_bottom_section_render.as_ref());
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
