use crate::grid::Grid;
use crate::units::{Height, Width};

pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

// petgraph reserves the maximum index value of an index type as its end marker.

pub fn small_rect_grid(width: Width, height: Height) -> Option<SmallRectangularGrid> {
    if fits_index(width, height, u8::MAX as usize) {
        Some(SmallRectangularGrid::new(width, height))
    } else {
        None
    }
}

pub fn medium_rect_grid(width: Width, height: Height) -> Option<MediumRectangularGrid> {
    if fits_index(width, height, u16::MAX as usize) {
        Some(MediumRectangularGrid::new(width, height))
    } else {
        None
    }
}

pub fn large_rect_grid(width: Width, height: Height) -> Option<LargeRectangularGrid> {
    if fits_index(width, height, u32::MAX as usize) {
        Some(LargeRectangularGrid::new(width, height))
    } else {
        None
    }
}

fn fits_index(width: Width, height: Height, index_max: usize) -> bool {
    width.0
        .checked_mul(height.0)
        .map_or(false, |cells_count| cells_count < index_max)
}
