//! The per-cell state of a maze: which neighbours a cell has passages to, and where the cell is
//! in an ongoing distance computation.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::coordinates::Coord;
use crate::directions::Direction;

/// A direction a maze passage can run in.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            CompassPrimary::North => Direction::North,
            CompassPrimary::East => Direction::East,
            CompassPrimary::South => Direction::South,
            CompassPrimary::West => Direction::West,
        }
    }

    #[inline]
    pub fn offset(self) -> Coord {
        self.direction().offset()
    }

    /// The compass direction matching a grid direction, `None` for diagonals.
    pub fn from_direction(direction: Direction) -> Option<CompassPrimary> {
        match direction {
            Direction::North => Some(CompassPrimary::North),
            Direction::East => Some(CompassPrimary::East),
            Direction::South => Some(CompassPrimary::South),
            Direction::West => Some(CompassPrimary::West),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of passage directions, one bit per `CompassPrimary`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Default)]
pub struct Connections(u8);

impl Connections {
    pub const NONE: Connections = Connections(0);
    pub const ALL: Connections = Connections(0x0F);

    /// Build from the low nibble of `bits`; higher bits are ignored.
    #[inline]
    pub fn from_bits(bits: u8) -> Connections {
        Connections(bits & Connections::ALL.0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, con: CompassPrimary) -> bool {
        self.0 & con.bit() != 0
    }

    #[inline]
    pub fn with(self, con: CompassPrimary) -> Connections {
        Connections(self.0 | con.bit())
    }

    #[inline]
    pub fn without(self, con: CompassPrimary) -> Connections {
        Connections(self.0 & !con.bit())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_all(self) -> bool {
        self == Connections::ALL
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The directions in the set, in `CompassPrimary::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = CompassPrimary> {
        CompassPrimary::ALL.into_iter().filter(move |con| self.contains(*con))
    }
}

impl From<CompassPrimary> for Connections {
    fn from(con: CompassPrimary) -> Connections {
        Connections(con.bit())
    }
}

impl BitOr for Connections {
    type Output = Connections;
    fn bitor(self, other: Connections) -> Connections {
        Connections(self.0 | other.0)
    }
}

impl BitAnd for Connections {
    type Output = Connections;
    fn bitand(self, other: Connections) -> Connections {
        Connections(self.0 & other.0)
    }
}

impl Not for Connections {
    type Output = Connections;
    fn not(self) -> Connections {
        Connections(!self.0 & Connections::ALL.0)
    }
}

impl fmt::Debug for Connections {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Progress of a cell through a distance computation.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum PathState {
    #[default]
    Unvisited,
    /// Lies on a path that has been marked out.
    Pathed,
    /// Discovered but not yet finalised, i.e. on the frontier.
    Edge,
    Visited,
}

impl PathState {
    pub const ALL: [PathState; 4] = [PathState::Unvisited,
                                     PathState::Pathed,
                                     PathState::Edge,
                                     PathState::Visited];
}

const PATH_BIT_OFFSET: u8 = 4;
const PATH_BIT_MASK: u8 = 0x30;

/// Everything stored about one maze cell.
///
/// Grids store it packed into a byte: connections in the low nibble, the path state in the
/// two bits above.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct MazeCell {
    pub connections: Connections,
    pub path: PathState,
}

impl MazeCell {
    pub fn new(connections: Connections, path: PathState) -> MazeCell {
        MazeCell { connections, path }
    }

    #[inline]
    pub fn pack(self) -> u8 {
        self.connections.bits() | ((self.path as u8) << PATH_BIT_OFFSET)
    }

    #[inline]
    pub fn unpack(value: u8) -> MazeCell {
        let path = PathState::ALL[((value & PATH_BIT_MASK) >> PATH_BIT_OFFSET) as usize];
        MazeCell::new(Connections::from_bits(value), path)
    }

    pub fn with_connections(self, connections: Connections) -> MazeCell {
        MazeCell { connections, ..self }
    }

    pub fn with_path(self, path: PathState) -> MazeCell {
        MazeCell { path, ..self }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_opposites_match_directions() {
        for con in CompassPrimary::ALL.iter().cloned() {
            assert_eq!(con.opposite().direction(), con.direction().opposite());
            assert_eq!(CompassPrimary::from_direction(con.direction()), Some(con));
        }
        assert_eq!(CompassPrimary::from_direction(Direction::SouthWest), None);
    }

    #[test]
    fn connection_set_operations() {
        let c = Connections::NONE.with(CompassPrimary::North).with(CompassPrimary::West);
        assert!(c.contains(CompassPrimary::North));
        assert!(c.contains(CompassPrimary::West));
        assert!(!c.contains(CompassPrimary::East));
        assert_eq!(c.len(), 2);
        assert_eq!(c.iter().collect::<Vec<_>>(),
                   vec![CompassPrimary::North, CompassPrimary::West]);

        let c = c.without(CompassPrimary::North);
        assert_eq!(c, Connections::from(CompassPrimary::West));
        assert_eq!(!c | c, Connections::ALL);
        assert_eq!(!c & c, Connections::NONE);
        assert!(Connections::ALL.is_all());
        assert!(Connections::NONE.is_empty());
        assert_eq!(Connections::from_bits(0xFF), Connections::ALL);
    }

    #[test]
    fn packed_layout() {
        let cell = MazeCell::new(Connections::from(CompassPrimary::North) |
                                 Connections::from(CompassPrimary::South),
                                 PathState::Edge);
        // north bit 0, south bit 2, edge = 2 in bits 4..6
        assert_eq!(cell.pack(), 0b0010_0101);
        assert_eq!(MazeCell::unpack(cell.pack()), cell);
        assert_eq!(MazeCell::unpack(0), MazeCell::default());
    }

    #[test]
    fn path_state_and_connections_are_independent() {
        for path in PathState::ALL.iter().cloned() {
            let cell = MazeCell::new(Connections::ALL, PathState::Unvisited).with_path(path);
            let unpacked = MazeCell::unpack(cell.pack());
            assert_eq!(unpacked.connections, Connections::ALL);
            assert_eq!(unpacked.path, path);
        }
    }
}
