//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board edge length. Boards are always square.
pub const BOARD_SIZE: u8 = 8;

/// Total number of cells on a board
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A (row, col) position on a board
///
/// Construction is unchecked so that out-of-bounds requests from callers can be
/// represented and rejected with a proper error rather than a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: u8,
    pub col: u8,
}

impl Coordinate {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index into a flat cell array
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn from_index(index: usize) -> Self {
        let size = BOARD_SIZE as usize;
        Self::new((index / size) as u8, (index % size) as u8)
    }

    /// Every coordinate on the board in row-major order
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_CELLS).map(Coordinate::from_index)
    }

    /// Manhattan distance, used for contiguity checks
    pub fn distance(&self, other: &Coordinate) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identifies one of the two players in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "Player 1"),
            PlayerId::Two => write!(f, "Player 2"),
        }
    }
}

/// Unique identifier for a ship within one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u8);
