use docopt::Docopt;
use labyrinth::{
    cells::Cartesian2DCoordinate,
    generators,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    grids::{large_rect_grid, LargeRectangularGrid},
    pathing::{self, PathFinder},
    units::{Height, Width},
};
use log::{info, warn};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    rc::Rc
};

const USAGE: &str = "Labyrinth

Usage:
    labyrinth_driver -h | --help
    labyrinth_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--show-path] [--max-expansions=<n>] [--mark-start-end] [--text-out=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 10].
    --grid-height=<h>      The grid height in a w*h grid [default: 10].
    --seed=<s>             Seed for the random maze. A different maze every run if not given.
    --show-path            Show the path from the top right entry to the bottom left exit.
    --max-expansions=<n>   Give up looking for the path after expanding n cells.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) at the entry and exit.
    --text-out=<path>      Output file path for the maze text. Printed to stdout if not given.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_max_expansions: Option<usize>,
    flag_mark_start_end: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Grid(::labyrinth::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut maze_grid = large_rect_grid(Width(width), Height(height))
        .ok_or_else(|| format!("A {}x{} grid has too many cells", width, height))?;

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };
    generators::recursive_backtracker(&mut maze_grid, &mut rng)?;
    info!("Generated a {}x{} maze with {} passages", width, height, maze_grid.open_edges_count());

    set_maze_griddisplay(&mut maze_grid, &args);

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Show the solution and/or the entry and exit markers if asked for.
/// A maze whose path cannot be found is shown without one.
fn set_maze_griddisplay(maze_grid: &mut LargeRectangularGrid, maze_args: &MazeArgs) {

    let (entry, exit) = match (generators::entry_corner(maze_grid), pathing::exit_corner(maze_grid)) {
        (Some(entry), Some(exit)) => (entry, exit),
        _ => return,
    };

    let path = if maze_args.flag_show_path {
        match path_finder(maze_args).find(maze_grid, entry, exit) {
            Ok(path) => Some(path),
            Err(failure) => {
                warn!("Not showing a path from {:?} to {:?}: {}", entry, exit, failure);
                None
            }
        }
    } else {
        None
    };

    let display: Option<Rc<dyn GridDisplay>> = match path {
        Some(path) if maze_args.flag_mark_start_end => {
            Some(Rc::new(PathDisplay::with_start_end_marks(&path)))
        }
        Some(path) => Some(Rc::new(PathDisplay::new(&path))),
        None if maze_args.flag_mark_start_end => Some(start_end_display(entry, exit)),
        None => None,
    };
    maze_grid.set_grid_display(display);
}

fn path_finder(maze_args: &MazeArgs) -> PathFinder {
    match maze_args.flag_max_expansions {
        Some(max_expansions) => PathFinder::new().with_max_expansions(max_expansions),
        None => PathFinder::new(),
    }
}

fn start_end_display(entry: Cartesian2DCoordinate, exit: Cartesian2DCoordinate) -> Rc<dyn GridDisplay> {
    Rc::new(StartEndPointsDisplay::new(vec![entry], vec![exit]))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
