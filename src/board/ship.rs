//! Ships and their damage state machine

use serde::{Deserialize, Serialize};

use crate::core::error::{FleetError, Result};
use crate::core::types::{Coordinate, ShipId};

/// Damage state of a ship. Sunk is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    Intact,
    PartiallyHit,
    Sunk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    cells: Vec<Coordinate>,
    hits: u8,
    sunk: bool,
}

impl Ship {
    pub(crate) fn new(id: ShipId, cells: Vec<Coordinate>) -> Self {
        Self {
            id,
            cells,
            hits: 0,
            sunk: false,
        }
    }

    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn status(&self) -> ShipStatus {
        if self.sunk {
            ShipStatus::Sunk
        } else if self.hits > 0 {
            ShipStatus::PartiallyHit
        } else {
            ShipStatus::Intact
        }
    }

    /// Count one more hit cell. Returns true if this hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> Result<bool> {
        if self.hits as usize >= self.cells.len() {
            return Err(FleetError::InvariantViolation(format!(
                "ship {:?} already has {} hits on {} cells",
                self.id,
                self.hits,
                self.cells.len()
            )));
        }
        self.hits += 1;
        if !self.sunk && self.hits as usize == self.cells.len() {
            self.sunk = true;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destroyer() -> Ship {
        Ship::new(
            ShipId(0),
            vec![Coordinate::new(1, 1), Coordinate::new(1, 2)],
        )
    }

    #[test]
    fn test_status_progression() {
        let mut ship = destroyer();
        assert_eq!(ship.status(), ShipStatus::Intact);

        assert!(!ship.register_hit().unwrap());
        assert_eq!(ship.status(), ShipStatus::PartiallyHit);

        assert!(ship.register_hit().unwrap());
        assert_eq!(ship.status(), ShipStatus::Sunk);
        assert!(ship.is_sunk());
    }

    #[test]
    fn test_extra_hit_is_invariant_violation() {
        let mut ship = Ship::new(ShipId(3), vec![Coordinate::new(0, 0)]);
        ship.register_hit().unwrap();
        let err = ship.register_hit().unwrap_err();
        assert!(err.is_fatal());
        assert!(ship.is_sunk());
    }
}
