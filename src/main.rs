use cellgrid::{
    coordinates::Coord,
    generators,
    grid_displays::{MazeText, PathDisplay, StartEndPointsDisplay},
    maze_grid::MazeGrid,
    pathing,
    renderers,
    units::{Height, Width},
};
use docopt::Docopt;
use error_chain::bail;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Cell grid mazes

Usage:
    maze_driver -h | --help
    maze_driver [--width=<w>] [--height=<h>] [--seed=<n>] [--start-x=<x> --start-y=<y>] [--show-distances | --show-path] [--text-out=<path>] [--image-out=<path>] [--pixel-multiplier=<n>] [--save-edges=<path>]

Options:
    -h --help                Show this screen.
    --width=<w>              The maze width in cells [default: 20].
    --height=<h>             The maze height in cells [default: 20].
    --seed=<n>               Seed for the maze generator. Random when not given.
    --start-x=<x>            x coordinate of the start point for distances and paths.
    --start-y=<y>            y coordinate of the start point for distances and paths.
    --show-distances         Show the distance from the start point to every cell, in hex. The start point is the longest path start if not specified.
    --show-path              Show the path from the start point to the cell furthest from it. The longest path is shown if no start point is specified.
    --text-out=<path>        Output file path for the text rendering of the maze, stdout otherwise.
    --image-out=<path>       Output file path for an image of the maze render grid. Always PNG format.
    --pixel-multiplier=<n>   Image pixels along each side of one render grid pixel [default: 4].
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_start_x: Option<isize>,
    flag_start_y: Option<isize>,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_pixel_multiplier: usize,
    flag_save_edges: String,
}

// The driver's own errors, linking in the library errors so `?` works on both.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Grid(::cellgrid::errors::Error, ::cellgrid::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut maze = MazeGrid::new(Width(args.flag_width), Height(args.flag_height))
        .chain_err(|| format!("Failed to create a {}x{} maze", args.flag_width, args.flag_height))?;

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generators::recursive_backtracker_with_rng(&mut maze, &mut rng);
    info!("generated a {}x{} maze with {} passages",
          maze.width(),
          maze.height(),
          maze.passage_count());

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let start = start_point(&args, &maze)?;
    let text = maze_text(&args, &mut maze, start)?;

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!("wrote the maze text to {}", args.flag_text_out);
    }

    if !args.flag_image_out.is_empty() {
        if args.flag_pixel_multiplier == 0 {
            bail!("--pixel-multiplier must be at least 1");
        }
        renderers::save_render_grid(maze.render_grid(),
                                    &args.flag_image_out,
                                    args.flag_pixel_multiplier)?;
    }

    Ok(())
}

/// The start point given on the command line, which has to be inside the maze.
fn start_point(args: &MazeArgs, maze: &MazeGrid) -> Result<Option<Coord>> {
    match (args.flag_start_x, args.flag_start_y) {
        (Some(x), Some(y)) => {
            let start = maze.checked_coord(x, y).chain_err(|| "Invalid start point")?;
            Ok(Some(start))
        }
        _ => Ok(None),
    }
}

/// Render the maze as text, with distances or a path in the cells if asked for.
/// Without a start point the longest path through the maze supplies one.
fn maze_text(args: &MazeArgs, maze: &mut MazeGrid, start: Option<Coord>) -> Result<String> {
    if !args.flag_show_distances && !args.flag_show_path {
        return Ok(match start {
            Some(s) => {
                let display = StartEndPointsDisplay::new(&[s], &[]);
                MazeText::with_display(maze, &display).to_string()
            }
            None => maze.to_string(),
        });
    }

    let path = match start {
        Some(s) => {
            let distances = pathing::Distances::<u32>::new(maze, s)?;
            let end = distances.furthest_points()[0];
            pathing::shortest_path(maze, &distances, end).unwrap_or_else(Vec::new)
        }
        None => pathing::longest_path::<u32>(maze)?.unwrap_or_else(Vec::new),
    };

    let path_start = match path.first() {
        Some(&s) => s,
        // an empty maze, nothing to put in the cells
        None => return Ok(maze.to_string()),
    };
    info!("path of {} cells from {:?}", path.len(), path_start);

    if args.flag_show_distances {
        let distances = pathing::Distances::<u32>::new(maze, path_start)?;
        Ok(MazeText::with_display(maze, &distances).to_string())
    } else {
        let display = PathDisplay::new(&path);
        Ok(MazeText::with_display(maze, &display).to_string())
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &MazeGrid, file_path: &str) -> Result<()> {
    write_text_to_file(&maze.edge_list(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("saved the maze graph to {}", file_path);
    Ok(())
}
