//! **cellgrid** is a 2D cell grid toolkit built around mazes: generation, distances and paths
//! through them, and text and image renderings.

pub mod bitvector;
pub mod cells;
pub mod coordinates;
pub mod directions;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze_grid;
pub mod pathing;
pub mod renderers;
pub mod units;
