//! Per-cell state

use serde::{Deserialize, Serialize};

use crate::core::types::{Coordinate, ShipId};
use crate::protection::ProtectionEntry;

/// Observable state of a cell
///
/// Hit and Miss are terminal: once a cell has been resolved it never goes
/// back to Empty or Occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Occupied,
    Hit,
    Miss,
}

impl CellState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub ship: Option<ShipId>,
    pub protection: Option<ProtectionEntry>,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            state: CellState::Empty,
            ship: None,
            protection: None,
        }
    }

    /// Resolve a strike on this cell, returning the state after the strike
    pub(crate) fn strike(&mut self) -> CellState {
        self.state = match self.state {
            CellState::Occupied => CellState::Hit,
            CellState::Empty => CellState::Miss,
            resolved => resolved,
        };
        self.state
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// One cell's change during an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDelta {
    pub coord: Coordinate,
    pub before: CellState,
    pub after: CellState,
    pub ship: Option<ShipId>,
    /// The strike sank this cell's ship
    pub sunk: bool,
}

impl CellDelta {
    pub fn is_hit(&self) -> bool {
        self.before == CellState::Occupied && self.after == CellState::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_transitions() {
        let mut empty = Cell::empty();
        assert_eq!(empty.strike(), CellState::Miss);

        let mut occupied = Cell {
            state: CellState::Occupied,
            ship: Some(ShipId(0)),
            protection: None,
        };
        assert_eq!(occupied.strike(), CellState::Hit);
    }

    #[test]
    fn test_resolved_cells_never_revert() {
        let mut cell = Cell::empty();
        cell.strike();
        assert_eq!(cell.strike(), CellState::Miss);
        assert!(cell.state.is_resolved());

        let mut hit = Cell {
            state: CellState::Hit,
            ship: Some(ShipId(1)),
            protection: None,
        };
        assert_eq!(hit.strike(), CellState::Hit);
    }
}
