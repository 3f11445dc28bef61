//! Text rendering of mazes with box drawing walls.

use std::fmt;

use fnv::FnvHashSet;
use smallvec::SmallVec;

use crate::cells::CompassPrimary;
use crate::coordinates::Coord;
use crate::maze_grid::MazeGrid;
use crate::pathing::{Distances, MaxDistance};

/// Supplies the text drawn inside each cell of a maze. Bodies are 3 characters wide.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: Coord) -> String;
}

const EMPTY_BODY: &str = "   ";

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: Coord) -> String {
        if let Some(d) = self.get(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Coord>,
}
impl PathDisplay {
    pub fn new(path: &[Coord]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Coord) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: SmallVec<[Coord; 8]>,
    end_coordinates: SmallVec<[Coord; 8]>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: &[Coord], ends: &[Coord]) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts.iter().cloned().collect(),
            end_coordinates: ends.iter().cloned().collect(),
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Coord) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

/// A maze drawn as text, with cell bodies from an optional `GridDisplay`.
pub struct MazeText<'a> {
    maze: &'a MazeGrid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeText<'a> {
    pub fn new(maze: &'a MazeGrid) -> MazeText<'a> {
        MazeText {
            maze,
            display: None,
        }
    }

    pub fn with_display(maze: &'a MazeGrid, display: &'a dyn GridDisplay) -> MazeText<'a> {
        MazeText {
            maze,
            display: Some(display),
        }
    }

    // Walls are addressed by the grid lines between cells: vertical line `cx` runs between
    // columns cx-1 and cx, horizontal line `cy` between rows cy-1 and cy.

    fn vertical_wall(&self, cx: usize, y: usize) -> bool {
        cx == 0 || cx == self.maze.width() ||
        !self.maze.has_connection(Coord::new(cx as isize - 1, y as isize), CompassPrimary::East)
    }

    fn horizontal_wall(&self, x: usize, cy: usize) -> bool {
        cy == 0 || cy == self.maze.height() ||
        !self.maze.has_connection(Coord::new(x as isize, cy as isize - 1), CompassPrimary::South)
    }

    fn corner(&self, cx: usize, cy: usize) -> &'static str {
        let up = cy > 0 && self.vertical_wall(cx, cy - 1);
        let down = cy < self.maze.height() && self.vertical_wall(cx, cy);
        let left = cx > 0 && self.horizontal_wall(cx - 1, cy);
        let right = cx < self.maze.width() && self.horizontal_wall(cx, cy);

        match (left, right, up, down) {
            (true, true, true, true) => "┼",
            (true, true, true, false) => "┴",
            (true, true, false, true) => "┬",
            (true, false, true, true) => "┤",
            (false, true, true, true) => "├",
            (true, true, false, false) => "─",
            (false, false, true, true) => "│",
            (false, true, true, false) => "└",
            (true, false, false, true) => "┐",
            (true, false, true, false) => "┘",
            (false, true, false, true) => "┌",
            (true, false, false, false) => "╴",
            (false, true, false, false) => "╶",
            (false, false, true, false) => "╵",
            (false, false, false, true) => "╷",
            (false, false, false, false) => " ",
        }
    }

    fn body(&self, coord: Coord) -> String {
        self.display.map_or_else(|| String::from(EMPTY_BODY), |d| d.render_cell_body(coord))
    }
}

impl<'a> fmt::Display for MazeText<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = (self.maze.width(), self.maze.height());
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut output = String::new();
        for cy in 0..height + 1 {
            for cx in 0..width + 1 {
                output.push_str(self.corner(cx, cy));
                if cx < width {
                    output.push_str(if self.horizontal_wall(cx, cy) { "───" } else { "   " });
                }
            }
            output.push('\n');

            if cy == height {
                break;
            }
            for cx in 0..width + 1 {
                output.push_str(if self.vertical_wall(cx, cy) { "│" } else { " " });
                if cx < width {
                    output.push_str(&self.body(Coord::new(cx as isize, cy as isize)));
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", MazeText::new(self))
    }
}
