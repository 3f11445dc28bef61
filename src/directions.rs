use smallvec::SmallVec;
use std::slice;

use crate::coordinates::Coord;

/// The 8 compass directions around a grid cell. North is towards smaller `y`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

const DIRECTION_OFFSETS: [Coord; 8] = [Coord::new(0, -1),
                                       Coord::new(1, -1),
                                       Coord::new(1, 0),
                                       Coord::new(1, 1),
                                       Coord::new(0, 1),
                                       Coord::new(-1, 1),
                                       Coord::new(-1, 0),
                                       Coord::new(-1, -1)];

impl Direction {
    pub const ALL: [Direction; 8] = [Direction::North,
                                     Direction::NorthEast,
                                     Direction::East,
                                     Direction::SouthEast,
                                     Direction::South,
                                     Direction::SouthWest,
                                     Direction::West,
                                     Direction::NorthWest];

    pub const CARDINALS: [Direction; 4] = [Direction::North,
                                           Direction::East,
                                           Direction::South,
                                           Direction::West];

    /// Position of the direction in `Direction::ALL`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The unit step taken when moving one cell in this direction.
    #[inline]
    pub fn offset(self) -> Coord {
        DIRECTION_OFFSETS[self.index()]
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 4) % 8]
    }

    #[inline]
    pub fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }
}

/// Which of the surrounding cells count as neighbours.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum DirectionSet {
    /// North, East, South and West.
    Cardinal,
    /// Cardinals plus the diagonals.
    All,
}

impl DirectionSet {
    pub fn directions(self) -> &'static [Direction] {
        match self {
            DirectionSet::Cardinal => &Direction::CARDINALS,
            DirectionSet::All => &Direction::ALL,
        }
    }
}

/// The subset of surrounding coordinates that exist for some cell, kept in `Direction` order.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct Neighbours {
    entries: SmallVec<[(Direction, Coord); 8]>,
}

impl Neighbours {
    pub fn new() -> Neighbours {
        Neighbours::default()
    }

    /// Add the neighbour in `direction`. Directions must be pushed in `Direction` order.
    pub fn push(&mut self, direction: Direction, coord: Coord) {
        debug_assert!(self.entries.last().map_or(true, |&(last, _)| last < direction),
                      "Neighbours pushed out of direction order");
        self.entries.push((direction, coord));
    }

    pub fn get(&self, direction: Direction) -> Option<Coord> {
        self.entries
            .iter()
            .find(|&&(dir, _)| dir == direction)
            .map(|&(_, coord)| coord)
    }

    #[inline]
    pub fn has(&self, direction: Direction) -> bool {
        self.get(direction).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<(Direction, Coord)> {
        self.entries.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.entries.iter().map(|&(_, coord)| coord)
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.entries.iter().map(|&(dir, _)| dir)
    }
}

impl<'a> IntoIterator for &'a Neighbours {
    type Item = &'a (Direction, Coord);
    type IntoIter = slice::Iter<'a, (Direction, Coord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
