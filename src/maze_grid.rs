//! A maze over a rectangular lattice of cells.
//!
//! A `MazeGrid` owns three structures that always agree with each other:
//!
//! - the logic grid, one packed `MazeCell` byte per cell,
//! - the render grid at `(2w+1) x (2h+1)` where cell `(x, y)` is drawn at `(2x+1, 2y+1)` and the
//!   pixel between two cells is lit when they share a passage,
//! - the frontier, a bit per cell that is set while the cell's path state is `Edge`.
//!
//! Every write goes through `set_cell`, which keeps passages symmetric between neighbours and
//! updates the frontier and render pixels to match.

use log::trace;
use petgraph::graph::UnGraph;

use crate::bitvector::BitVector;
use crate::cells::{CompassPrimary, Connections, MazeCell, PathState};
use crate::coordinates::{Coord, Rect};
use crate::directions::{DirectionSet, Neighbours};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Intensity of a lit render pixel.
pub const RENDER_ON: u8 = 255;
/// Intensity of a wall render pixel.
pub const RENDER_OFF: u8 = 0;

#[derive(Clone, Debug)]
pub struct MazeGrid {
    logic: Grid,
    render: Grid,
    frontier: BitVector,
}

impl MazeGrid {
    /// A maze with no passages, every cell `Unvisited`.
    pub fn new(width: Width, height: Height) -> Result<MazeGrid> {
        let (Width(w), Height(h)) = (width, height);
        let logic = Grid::new(width, height)?;

        let render_side = |n: usize| n.checked_mul(2).and_then(|d| d.checked_add(1));
        let (render_w, render_h) = match (render_side(w), render_side(h)) {
            (Some(rw), Some(rh)) => (rw, rh),
            _ => return Err(ErrorKind::DimensionsOverflow(w, h).into()),
        };
        let mut render = Grid::new(Width(render_w), Height(render_h))?;
        for coord in logic.rect().coords() {
            render.set(render_centre(coord), RENDER_ON);
        }

        let frontier = BitVector::new(logic.size())?;

        Ok(MazeGrid {
            logic,
            render,
            frontier,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.logic.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.logic.height()
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.logic.size()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.logic.rect()
    }

    #[inline]
    pub fn has_coord(&self, coord: Coord) -> bool {
        self.logic.has_coord(coord)
    }

    /// `(x, y)` as a coordinate, or an error when the maze does not contain it.
    pub fn checked_coord(&self, x: isize, y: isize) -> Result<Coord> {
        let coord = Coord::new(x, y);
        if !self.has_coord(coord) {
            return Err(ErrorKind::CoordOutsideGrid(x, y, self.width(), self.height()).into());
        }
        Ok(coord)
    }

    #[inline]
    pub fn index_of(&self, coord: Coord) -> usize {
        self.logic.index_of(coord)
    }

    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        self.logic.coord_of(index)
    }

    /// The wall/passage picture of the maze, read only.
    #[inline]
    pub fn render_grid(&self) -> &Grid {
        &self.render
    }

    /// The packed byte stored for `coord`: connections in bits 0-3, path state in bits 4-5.
    #[inline]
    pub fn raw_value(&self, coord: Coord) -> u8 {
        self.logic.get(coord)
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> MazeCell {
        MazeCell::unpack(self.raw_value(coord))
    }

    #[inline]
    pub fn connections(&self, coord: Coord) -> Connections {
        self.cell(coord).connections
    }

    #[inline]
    pub fn has_connection(&self, coord: Coord, con: CompassPrimary) -> bool {
        self.connections(coord).contains(con)
    }

    #[inline]
    pub fn path_state(&self, coord: Coord) -> PathState {
        self.cell(coord).path
    }

    #[inline]
    pub fn is_path_state(&self, coord: Coord, state: PathState) -> bool {
        self.path_state(coord) == state
    }

    /// Write a cell, the only way the logic grid is ever changed.
    ///
    /// Connections toward neighbours outside the grid are dropped. Every connection that is
    /// added or removed is mirrored on the neighbour, the frontier bit follows the `Edge` state
    /// and the render pixels around the cell follow its connections.
    ///
    /// # Panics
    /// If `coord` is outside the grid.
    pub fn set_cell(&mut self, coord: Coord, cell: MazeCell) {
        let old = self.cell(coord);
        let new = cell.with_connections(self.in_bounds_connections(coord, cell.connections));
        self.logic.set(coord, new.pack());

        for con in CompassPrimary::ALL.iter().cloned() {
            if old.connections.contains(con) == new.connections.contains(con) {
                continue;
            }
            let nbr = coord + con.offset();
            let nbr_cell = self.cell(nbr);
            let nbr_connections = if new.connections.contains(con) {
                nbr_cell.connections.with(con.opposite())
            } else {
                nbr_cell.connections.without(con.opposite())
            };
            self.logic.set(nbr, nbr_cell.with_connections(nbr_connections).pack());
        }

        let is_edge = new.path == PathState::Edge;
        if (old.path == PathState::Edge) != is_edge {
            let index = self.logic.index_of(coord);
            self.frontier.set(index, is_edge);
        }

        let centre = render_centre(coord);
        for con in CompassPrimary::ALL.iter().cloned() {
            let pixel = if new.connections.contains(con) {
                RENDER_ON
            } else {
                RENDER_OFF
            };
            self.render.set(centre + con.offset(), pixel);
        }
        trace!("{:?} {:?} -> {:?}", coord, old, new);
    }

    pub fn set_connections(&mut self, coord: Coord, connections: Connections) {
        let cell = self.cell(coord).with_connections(connections);
        self.set_cell(coord, cell);
    }

    pub fn add_connections(&mut self, coord: Coord, connections: Connections) {
        let current = self.connections(coord);
        self.set_connections(coord, current | connections);
    }

    pub fn remove_connections(&mut self, coord: Coord, connections: Connections) {
        let current = self.connections(coord);
        self.set_connections(coord, current & !connections);
    }

    pub fn set_path_state(&mut self, coord: Coord, state: PathState) {
        let cell = self.cell(coord).with_path(state);
        self.set_cell(coord, cell);
    }

    /// Put every cell back to `Unvisited`, emptying the frontier.
    pub fn reset_path_states(&mut self) {
        for coord in self.rect().coords() {
            if !self.is_path_state(coord, PathState::Unvisited) {
                self.set_path_state(coord, PathState::Unvisited);
            }
        }
    }

    /// The cardinal neighbours inside the grid.
    #[inline]
    pub fn neighbours(&self, coord: Coord) -> Neighbours {
        self.logic.neighbours(coord, DirectionSet::Cardinal)
    }

    /// The neighbours reachable through a passage from `coord`.
    pub fn connected_neighbours(&self, coord: Coord) -> Neighbours {
        let connections = self.connections(coord);
        let mut connected = Neighbours::new();
        for &(dir, nbr) in self.neighbours(coord).iter() {
            let linked = CompassPrimary::from_direction(dir)
                .map_or(false, |con| connections.contains(con));
            if linked {
                connected.push(dir, nbr);
            }
        }
        connected
    }

    /// The first frontier cell after `after` in row-major order, or the first frontier cell of
    /// all when `after` is `None`.
    pub fn next_frontier_coord(&self, after: Option<Coord>) -> Option<Coord> {
        let after_index = after.map(|c| self.logic.index_of(c));
        self.frontier.search(after_index).map(|i| self.logic.coord_of(i))
    }

    /// Every cell whose path state is `Edge`, in row-major order.
    pub fn frontier_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.frontier.iter().map(move |i| self.logic.coord_of(i))
    }

    /// Each passage once, as the pair (cell, east or south neighbour).
    pub fn passages(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.rect().coords().flat_map(move |coord| {
            let connections = self.connections(coord);
            [CompassPrimary::East, CompassPrimary::South]
                .into_iter()
                .filter(move |&con| connections.contains(con))
                .map(move |con| (coord, coord + con.offset()))
        })
    }

    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    /// The passage graph as text. Line 1 is `vertices edges`, then one `a b` line per passage.
    /// Vertices are the 1-based row-major cell indices.
    pub fn edge_list(&self) -> String {
        let mut text = format!("{} {}\n", self.size(), self.passage_count());
        for (a, b) in self.passages() {
            text.push_str(&format!("{} {}\n", self.index_of(a) + 1, self.index_of(b) + 1));
        }
        text
    }

    /// The passage graph. Node `i` holds the cell at row-major index `i`.
    pub fn to_graph(&self) -> UnGraph<Coord, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size().saturating_sub(1));
        let nodes = self.rect().coords().map(|c| graph.add_node(c)).collect::<Vec<_>>();
        for (a, b) in self.passages() {
            graph.add_edge(nodes[self.index_of(a)], nodes[self.index_of(b)], ());
        }
        graph
    }

    fn in_bounds_connections(&self, coord: Coord, connections: Connections) -> Connections {
        connections.iter()
            .filter(|con| self.has_coord(coord + con.offset()))
            .fold(Connections::NONE, |acc, con| acc.with(con))
    }
}

#[inline]
fn render_centre(coord: Coord) -> Coord {
    Coord::new(2 * coord.x + 1, 2 * coord.y + 1)
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};

    use super::*;

    fn gc(x: isize, y: isize) -> Coord {
        Coord::new(x, y)
    }

    fn maze(w: usize, h: usize) -> MazeGrid {
        MazeGrid::new(Width(w), Height(h)).unwrap()
    }

    fn con(c: CompassPrimary) -> Connections {
        Connections::from(c)
    }

    fn assert_consistent(m: &MazeGrid) {
        for coord in m.rect().coords() {
            for c in CompassPrimary::ALL.iter().cloned() {
                let nbr = coord + c.offset();
                if m.has_coord(nbr) {
                    assert_eq!(m.has_connection(coord, c),
                               m.has_connection(nbr, c.opposite()),
                               "asymmetric passage {:?} {:?}",
                               coord,
                               c);
                } else {
                    assert!(!m.has_connection(coord, c));
                }
                let pixel = m.render_grid().get(render_centre(coord) + c.offset());
                assert_eq!(pixel == RENDER_ON, m.has_connection(coord, c));
            }
            assert_eq!(m.render_grid().get(render_centre(coord)), RENDER_ON);
        }
        let edges = m.rect()
            .coords()
            .filter(|&c| m.is_path_state(c, PathState::Edge))
            .collect_vec();
        assert_eq!(m.frontier_coords().collect_vec(), edges);
    }

    #[test]
    fn new_maze_render_grid() {
        let m = maze(3, 2);
        let render = m.render_grid();
        assert_eq!((render.width(), render.height()), (7, 5));
        let lit = render.rect().coords().filter(|&c| render.get(c) == RENDER_ON).collect_vec();
        assert_eq!(lit,
                   vec![gc(1, 1), gc(3, 1), gc(5, 1), gc(1, 3), gc(3, 3), gc(5, 3)]);
        assert_eq!(m.passage_count(), 0);
        assert_eq!(m.frontier_coords().count(), 0);
    }

    #[test]
    fn empty_maze() {
        let m = maze(0, 0);
        assert_eq!(m.size(), 0);
        assert_eq!(m.render_grid().size(), 1);
        assert_eq!(m.next_frontier_coord(None), None);
    }

    #[test]
    fn connections_are_mirrored() {
        let mut m = maze(3, 3);
        m.add_connections(gc(1, 1), con(CompassPrimary::East) | con(CompassPrimary::North));
        assert!(m.has_connection(gc(2, 1), CompassPrimary::West));
        assert!(m.has_connection(gc(1, 0), CompassPrimary::South));
        assert_eq!(m.connections(gc(1, 1)).len(), 2);

        m.remove_connections(gc(2, 1), con(CompassPrimary::West));
        assert!(!m.has_connection(gc(1, 1), CompassPrimary::East));
        assert!(m.has_connection(gc(1, 1), CompassPrimary::North));
        assert_consistent(&m);
    }

    #[test]
    fn connections_out_of_the_grid_are_dropped() {
        let mut m = maze(2, 2);
        m.set_connections(gc(0, 0), Connections::ALL);
        assert_eq!(m.connections(gc(0, 0)),
                   con(CompassPrimary::East) | con(CompassPrimary::South));
        assert_eq!(m.raw_value(gc(0, 0)), 0b0110);
        assert_consistent(&m);
    }

    #[test]
    fn render_pixels_follow_connections() {
        let mut m = maze(2, 1);
        m.add_connections(gc(0, 0), con(CompassPrimary::East));
        assert_eq!(m.render_grid().get(gc(2, 1)), RENDER_ON);
        m.set_connections(gc(1, 0), Connections::NONE);
        assert_eq!(m.render_grid().get(gc(2, 1)), RENDER_OFF);
        assert_eq!(m.connections(gc(0, 0)), Connections::NONE);
    }

    #[test]
    fn path_state_leaves_connections_alone() {
        let mut m = maze(2, 2);
        m.add_connections(gc(0, 0), con(CompassPrimary::South));
        m.set_path_state(gc(0, 0), PathState::Visited);
        assert_eq!(m.cell(gc(0, 0)),
                   MazeCell::new(con(CompassPrimary::South), PathState::Visited));
        assert!(m.has_connection(gc(0, 1), CompassPrimary::North));
    }

    #[test]
    fn frontier_tracks_edge_cells() {
        let mut m = maze(70, 2);
        m.set_path_state(gc(69, 0), PathState::Edge);
        m.set_path_state(gc(3, 1), PathState::Edge);
        m.set_path_state(gc(5, 0), PathState::Edge);
        assert_eq!(m.frontier_coords().collect_vec(),
                   vec![gc(5, 0), gc(69, 0), gc(3, 1)]);
        assert_eq!(m.next_frontier_coord(None), Some(gc(5, 0)));
        assert_eq!(m.next_frontier_coord(Some(gc(5, 0))), Some(gc(69, 0)));
        assert_eq!(m.next_frontier_coord(Some(gc(3, 1))), None);

        m.set_path_state(gc(69, 0), PathState::Visited);
        assert_eq!(m.next_frontier_coord(Some(gc(5, 0))), Some(gc(3, 1)));

        m.reset_path_states();
        assert_eq!(m.frontier_coords().count(), 0);
        assert!(m.rect().coords().all(|c| m.is_path_state(c, PathState::Unvisited)));
    }

    #[test]
    fn connected_neighbours_follow_passages() {
        let mut m = maze(3, 3);
        m.add_connections(gc(1, 1), con(CompassPrimary::West));
        m.add_connections(gc(1, 2), con(CompassPrimary::North));
        assert_eq!(m.neighbours(gc(1, 1)).len(), 4);
        assert_eq!(m.connected_neighbours(gc(1, 1)).coords().collect_vec(),
                   vec![gc(1, 2), gc(0, 1)]);
        assert_eq!(m.connected_neighbours(gc(2, 2)).len(), 0);
    }

    #[test]
    fn passages_and_graph() {
        let mut m = maze(2, 2);
        m.add_connections(gc(0, 0), con(CompassPrimary::East) | con(CompassPrimary::South));
        m.add_connections(gc(1, 1), con(CompassPrimary::West));
        assert_eq!(m.passages().collect_vec(),
                   vec![(gc(0, 0), gc(1, 0)), (gc(0, 0), gc(0, 1)), (gc(0, 1), gc(1, 1))]);
        assert_eq!(m.passage_count(), 3);

        let g = m.to_graph();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn edge_list_uses_one_based_indices() {
        let mut m = maze(2, 2);
        m.add_connections(gc(0, 0), con(CompassPrimary::East) | con(CompassPrimary::South));
        m.add_connections(gc(1, 1), con(CompassPrimary::West));
        assert_eq!(m.edge_list(), "4 3\n1 2\n1 3\n3 4\n");

        assert_eq!(maze(3, 1).edge_list(), "3 0\n");
        assert_eq!(maze(0, 0).edge_list(), "0 0\n");
    }

    #[test]
    fn checked_coord_rejects_points_outside() {
        let m = maze(3, 2);
        assert_eq!(m.checked_coord(2, 1).unwrap(), gc(2, 1));
        assert_eq!(m.checked_coord(0, 0).unwrap(), gc(0, 0));
        for &(x, y) in &[(3, 0), (0, 2), (-1, 0), (0, -1), (isize::MAX, isize::MIN)] {
            match m.checked_coord(x, y) {
                Err(Error(ErrorKind::CoordOutsideGrid(ex, ey, 3, 2), _)) => {
                    assert_eq!((ex, ey), (x, y));
                }
                other => panic!("expected CoordOutsideGrid for ({}, {}), got {:?}", x, y, other),
            }
        }
    }

    #[test]
    #[should_panic]
    fn writing_outside_panics() {
        let mut m = maze(2, 2);
        m.set_path_state(gc(2, 0), PathState::Edge);
    }

    #[test]
    fn quickcheck_random_writes_stay_consistent() {
        fn p(w: u8, h: u8, writes: Vec<(u8, u8, u8)>) -> TestResult {
            let (w, h) = (w as usize % 9, h as usize % 9);
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let mut m = maze(w, h);
            for (x, y, value) in writes {
                let coord = gc((x as usize % w) as isize, (y as usize % h) as isize);
                match value % 3 {
                    0 => m.set_cell(coord, MazeCell::unpack(value)),
                    1 => m.add_connections(coord, Connections::from_bits(value >> 2)),
                    _ => m.remove_connections(coord, Connections::from_bits(value >> 2)),
                }
            }
            assert_consistent(&m);
            TestResult::passed()
        }
        quickcheck(p as fn(u8, u8, Vec<(u8, u8, u8)>) -> TestResult);
    }
}
