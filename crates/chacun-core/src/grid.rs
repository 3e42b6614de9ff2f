//! Square grid coordinate system.
//!
//! This module provides the foundational geometry types for the board:
//! - `Direction`: the four sides of a square tile
//! - `Rotation`: quarter-turn rotations applied to a tile when placed
//! - `Pos`: a cell of the (unbounded in principle) grid
//!
//! The board is centered on the origin where the start tile lies. `x` grows
//! eastwards and `y` grows southwards, so `North` is `y - 1`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a tile, in clockwise order starting from North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    /// All directions in clockwise order starting from North
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Position of this direction in `ALL`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction obtained by applying `rotation` to this one
    pub fn rotated(self, rotation: Rotation) -> Direction {
        Self::ALL[(self.index() + rotation.quarter_turns_cw() as usize) % 4]
    }

    /// The direction facing this one
    pub fn opposite(self) -> Direction {
        self.rotated(Rotation::HalfTurn)
    }
}

/// Clockwise rotation of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Rotation {
    #[default]
    None,
    Right,
    HalfTurn,
    Left,
}

impl Rotation {
    /// All rotations in increasing quarter-turn order
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Right,
        Rotation::HalfTurn,
        Rotation::Left,
    ];

    /// Number of clockwise quarter turns (0-3)
    pub const fn quarter_turns_cw(self) -> u32 {
        self as u32
    }

    /// Angle of this rotation in degrees, clockwise
    pub const fn degrees_cw(self) -> u32 {
        self.quarter_turns_cw() * 90
    }

    /// Compose two rotations
    pub fn add(self, that: Rotation) -> Rotation {
        Self::ALL[((self.quarter_turns_cw() + that.quarter_turns_cw()) % 4) as usize]
    }

    /// The rotation undoing this one
    pub fn negated(self) -> Rotation {
        Self::ALL[((4 - self.quarter_turns_cw()) % 4) as usize]
    }
}

/// Grid position of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Pos {
    /// Column (increases going east)
    pub x: i32,
    /// Row (increases going south)
    pub y: i32,
}

impl Pos {
    /// The origin, where the start tile is placed
    pub const ORIGIN: Pos = Pos::new(0, 0);

    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position moved by the given offsets
    pub const fn translated(&self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// The neighboring position in a specific direction
    pub fn neighbor(&self, direction: Direction) -> Pos {
        match direction {
            Direction::N => self.translated(0, -1),
            Direction::E => self.translated(1, 0),
            Direction::S => self.translated(0, 1),
            Direction::W => self.translated(-1, 0),
        }
    }

    /// The four orthogonal neighbors, in `Direction::ALL` order
    pub fn neighbors(&self) -> [Pos; 4] {
        Direction::ALL.map(|d| self.neighbor(d))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::N.rotated(Rotation::Right), Direction::E);
        assert_eq!(Direction::W.rotated(Rotation::Right), Direction::N);
        assert_eq!(Direction::E.rotated(Rotation::Left), Direction::N);
        assert_eq!(Direction::S.rotated(Rotation::None), Direction::S);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::N.opposite(), Direction::S);
        assert_eq!(Direction::E.opposite(), Direction::W);
    }

    #[test]
    fn test_rotation_arithmetic() {
        assert_eq!(Rotation::Right.add(Rotation::Left), Rotation::None);
        assert_eq!(Rotation::HalfTurn.add(Rotation::Left), Rotation::Right);
        assert_eq!(Rotation::Right.negated(), Rotation::Left);
        assert_eq!(Rotation::None.negated(), Rotation::None);
        assert_eq!(Rotation::HalfTurn.degrees_cw(), 180);
        for rotation in Rotation::ALL {
            assert_eq!(rotation.add(rotation.negated()), Rotation::None);
        }
    }

    #[test]
    fn test_neighbors() {
        let pos = Pos::new(2, -3);
        assert_eq!(pos.neighbor(Direction::N), Pos::new(2, -4));
        assert_eq!(pos.neighbor(Direction::E), Pos::new(3, -3));
        assert_eq!(pos.neighbor(Direction::S), Pos::new(2, -2));
        assert_eq!(pos.neighbor(Direction::W), Pos::new(1, -3));

        for direction in Direction::ALL {
            assert_eq!(pos.neighbor(direction).neighbor(direction.opposite()), pos);
        }
    }
}
