use log::debug;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::CompassPrimary;
use crate::coordinates::Coord;
use crate::maze_grid::MazeGrid;

/// Carve a perfect maze (a spanning tree of the grid) with the recursive backtracker, using the
/// thread local random number generator.
pub fn recursive_backtracker(maze: &mut MazeGrid) {
    let mut rng = rand::thread_rng();
    recursive_backtracker_with_rng(maze, &mut rng);
}

/// Apply the recursive backtracker maze generation algorithm to the maze.
///
/// Starting from a random cell it performs a random walk, only ever stepping into a cell that
/// has no passages yet and carving a passage on the way in. When the walk reaches a cell with no
/// such neighbours it backs up along the route it came, until it finds a cell that still has an
/// untouched neighbour, and walks again from there.
/// The route is remembered as the directions stepped in rather than the cells, the previous cell
/// is found by stepping back against the last direction.
/// A cell with any passage has been visited as passages are only ever added here, so the maze
/// should start with no passages.
/// Long winding passages with few dead ends are typical of this algorithm.
pub fn recursive_backtracker_with_rng<R: Rng>(maze: &mut MazeGrid, rng: &mut R) {
    if maze.size() == 0 {
        return;
    }

    let start = Coord::new(rng.gen_range(0..maze.width()) as isize,
                           rng.gen_range(0..maze.height()) as isize);

    // The first entry only exists to keep the loop going while we are at the start cell, the
    // step back taken when it is popped goes nowhere that matters.
    let mut route = Vec::with_capacity(maze.size());
    route.push(CompassPrimary::North);

    let mut current = start;
    let mut carved = 0;
    let mut deepest = route.len();

    while let Some(&arrived_by) = route.last() {
        let candidates = CompassPrimary::ALL
            .iter()
            .cloned()
            .filter(|con| {
                let nbr = current + con.offset();
                maze.has_coord(nbr) && maze.connections(nbr).is_empty()
            })
            .collect::<SmallVec<[CompassPrimary; 4]>>();

        if candidates.is_empty() {
            route.pop();
            current = current - arrived_by.offset();
        } else {
            let step = candidates[rng.gen_range(0..candidates.len())];
            maze.add_connections(current, step.into());
            current = current + step.offset();
            route.push(step);

            carved += 1;
            deepest = deepest.max(route.len());
        }
    }

    debug!("recursive backtracker from {:?}: {} passages carved, route depth peaked at {}",
           start,
           carved,
           deepest);
}


#[cfg(test)]
mod tests {

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::units::{Height, Width};

    fn maze(w: usize, h: usize) -> MazeGrid {
        MazeGrid::new(Width(w), Height(h)).unwrap()
    }

    fn assert_spanning_tree(m: &MazeGrid) {
        let graph = m.to_graph();
        assert_eq!(graph.edge_count(), m.size() - 1);
        assert_eq!(connected_components(&graph), 1);
        assert!(!is_cyclic_undirected(&graph));
    }

    #[test]
    fn single_cell_maze_has_no_passages() {
        let mut m = maze(1, 1);
        recursive_backtracker(&mut m);
        assert_eq!(m.passage_count(), 0);
        assert!(m.connections(Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn empty_maze_is_left_alone() {
        let mut m = maze(0, 5);
        recursive_backtracker(&mut m);
        assert_eq!(m.passage_count(), 0);
    }

    #[test]
    fn two_cells_are_joined() {
        let mut m = maze(2, 1);
        recursive_backtracker(&mut m);
        assert_eq!(m.passage_count(), 1);
        assert!(m.has_connection(Coord::new(0, 0), CompassPrimary::East));
        assert!(m.has_connection(Coord::new(1, 0), CompassPrimary::West));
    }

    #[test]
    fn generates_spanning_trees() {
        for &(w, h, seed) in [(5, 5, 1), (1, 12, 2), (12, 1, 3), (17, 9, 4), (32, 32, 5)].iter() {
            let mut m = maze(w, h);
            let mut rng = StdRng::seed_from_u64(seed);
            recursive_backtracker_with_rng(&mut m, &mut rng);
            assert_spanning_tree(&m);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = maze(10, 10);
        let mut b = maze(10, 10);
        recursive_backtracker_with_rng(&mut a, &mut StdRng::seed_from_u64(42));
        recursive_backtracker_with_rng(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.render_grid(), b.render_grid());
        assert_eq!(a.passages().collect::<Vec<_>>(), b.passages().collect::<Vec<_>>());
    }

    #[test]
    fn every_cell_is_rendered_with_its_passages() {
        let mut m = maze(4, 3);
        recursive_backtracker_with_rng(&mut m, &mut StdRng::seed_from_u64(7));
        let lit = m.render_grid().as_bytes().iter().filter(|&&p| p == 255).count();
        // cell centres plus one pixel per passage
        assert_eq!(lit, 12 + 11);
    }
}
