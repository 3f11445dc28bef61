//! Distances through a maze from a start cell, and the paths they lead to.

use std::fmt::{Debug, Display, LowerHex};

use log::debug;
use num::traits::{Bounded, CheckedAdd, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::PathState;
use crate::coordinates::Coord;
use crate::errors::*;
use crate::maze_grid::MazeGrid;

// Trait used purely as a generic type parameter alias because it looks ugly to type this out
// each time.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + CheckedAdd + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T> MaxDistance for T
    where T: Zero + One + Bounded + Unsigned + CheckedAdd + Debug + Clone + Copy + Display +
             LowerHex + Ord
{
}

/// Steps from one start cell to every cell of a maze.
///
/// Unreachable cells hold the maximum value of the distance type, which reads back as `None`.
///
/// # Notes
/// The maximum value doubles as "unreachable", so with a narrow distance type any cell at least
/// `max_value()` steps from the start also reads back as `None`. Pick a type wide enough for
/// the maze, `u32` by default.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start: Coord,
    width: usize,
    height: usize,
    distances: Vec<MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// Expand outwards from `start` through the maze's passages.
    ///
    /// The maze's path states are reset first and are left with every reached cell `Visited`.
    /// The frontier of `Edge` cells is rescanned on each step for its closest cell, the first in
    /// row-major order winning ties.
    ///
    /// # Panics
    /// If `start` is outside the maze.
    pub fn new(maze: &mut MazeGrid, start: Coord) -> Result<Distances<MaxDistanceT>> {
        assert!(maze.has_coord(start),
                "Distance start {:?} is outside a {}x{} maze",
                start,
                maze.width(),
                maze.height());

        let infinity = MaxDistanceT::max_value();
        let mut distances = Vec::new();
        distances.try_reserve_exact(maze.size())?;
        distances.resize(maze.size(), infinity);

        maze.reset_path_states();
        distances[maze.index_of(start)] = MaxDistanceT::zero();
        maze.set_path_state(start, PathState::Edge);

        let mut steps = 0usize;
        let mut frontier_visits = 0usize;
        loop {
            let mut closest: Option<(Coord, MaxDistanceT)> = None;
            let mut scan_at = None;
            while let Some(coord) = maze.next_frontier_coord(scan_at) {
                let d = distances[maze.index_of(coord)];
                if closest.map_or(true, |(_, closest_d)| d < closest_d) {
                    closest = Some((coord, d));
                }
                scan_at = Some(coord);
                frontier_visits += 1;
            }

            let (current, current_distance) = match closest {
                Some(c) => c,
                None => break,
            };
            maze.set_path_state(current, PathState::Visited);
            steps += 1;

            let next_distance = current_distance
                .checked_add(&MaxDistanceT::one())
                .unwrap_or(infinity);
            for &(_, nbr) in maze.connected_neighbours(current).iter() {
                let state = maze.path_state(nbr);
                if state != PathState::Unvisited && state != PathState::Edge {
                    continue;
                }
                let nbr_index = maze.index_of(nbr);
                if next_distance < distances[nbr_index] {
                    distances[nbr_index] = next_distance;
                }
                if state == PathState::Unvisited {
                    maze.set_path_state(nbr, PathState::Edge);
                }
            }
        }

        let max_distance = distances.iter()
            .cloned()
            .filter(|&d| d != infinity)
            .max()
            .unwrap_or_else(MaxDistanceT::zero);

        debug!("distances from {:?}: {} cells reached, max distance {}, {} frontier visits",
               start,
               steps,
               max_distance,
               frontier_visits);

        Ok(Distances {
            start,
            width: maze.width(),
            height: maze.height(),
            distances,
            max_distance,
        })
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// Steps from the start to `coord`, `None` if it cannot be reached or is not in the maze.
    pub fn get(&self, coord: Coord) -> Option<MaxDistanceT> {
        let in_bounds = coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.width &&
                        (coord.y as usize) < self.height;
        if !in_bounds {
            return None;
        }
        let d = self.distances[self.width * coord.y as usize + coord.x as usize];
        if d == MaxDistanceT::max_value() {
            None
        } else {
            Some(d)
        }
    }

    /// All distances in row-major order, unreachable cells holding the maximum value.
    #[inline]
    pub fn as_slice(&self) -> &[MaxDistanceT] {
        &self.distances
    }

    /// The cells at the maximum distance, in row-major order.
    pub fn furthest_points(&self) -> SmallVec<[Coord; 8]> {
        let width = self.width;
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == self.max_distance)
            .map(|(i, _)| Coord::new((i % width) as isize, (i / width) as isize))
            .collect()
    }
}

/// The route from the start of `distances` to `end`, both included.
///
/// Walks back from `end` always stepping through a passage to the neighbour closest to the start.
/// `None` if `end` is not reachable.
pub fn shortest_path<MaxDistanceT>(maze: &MazeGrid,
                                   distances: &Distances<MaxDistanceT>,
                                   end: Coord)
                                   -> Option<Vec<Coord>>
    where MaxDistanceT: MaxDistance
{
    let mut current_distance = distances.get(end)?;
    let start = distances.start();
    let mut current = end;
    let mut path = vec![end];

    while current != start {
        let closest = maze.connected_neighbours(current)
            .coords()
            .filter_map(|c| distances.get(c).map(|d| (c, d)))
            .min_by_key(|&(_, d)| d);

        match closest {
            Some((closer, closer_distance)) if closer_distance < current_distance => {
                current = closer;
                current_distance = closer_distance;
                path.push(current);
            }
            // the distances do not belong to this maze
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path through a perfect maze: the furthest cell from an arbitrary cell is one end,
/// the furthest cell from that end is the other.
/// On a maze with loops or unreachable areas the result is some long path, not necessarily the
/// longest.
pub fn longest_path<MaxDistanceT>(maze: &mut MazeGrid) -> Result<Option<Vec<Coord>>>
    where MaxDistanceT: MaxDistance
{
    if maze.size() == 0 {
        return Ok(None);
    }

    let first = Distances::<MaxDistanceT>::new(maze, Coord::new(0, 0))?;
    let path_start = first.furthest_points()[0];

    let from_path_start = Distances::<MaxDistanceT>::new(maze, path_start)?;
    let path_end = from_path_start.furthest_points()[0];

    Ok(shortest_path(maze, &from_path_start, path_end))
}

/// Set every cell of `path` to `Pathed`.
pub fn mark_path(maze: &mut MazeGrid, path: &[Coord]) {
    for &coord in path {
        maze.set_path_state(coord, PathState::Pathed);
    }
}
