//! Board model - one player's grid and fleet

use serde::Serialize;

use crate::board::cell::{Cell, CellDelta, CellState};
use crate::board::placement;
use crate::board::ship::Ship;
use crate::core::config::FleetConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::{Coordinate, PlayerId, ShipId, BOARD_CELLS};

/// An 8x8 grid plus the fleet placed on it, owned by a single player
///
/// After placement the board is mutated only through the weapon resolver and
/// the protection tracker.
#[derive(Debug, Clone)]
pub struct Board {
    owner: PlayerId,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
    placed: bool,
    shots_received: u32,
}

/// Summary counters for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub ships_total: usize,
    pub ships_sunk: usize,
    pub ships_remaining: usize,
    pub cells_hit: usize,
    pub cells_missed: usize,
    pub shots_received: u32,
}

impl Board {
    /// Create an empty board with no fleet
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            cells: vec![Cell::empty(); BOARD_CELLS],
            ships: Vec::new(),
            placed: false,
            shots_received: 0,
        }
    }

    /// Place the fleet. Allowed exactly once per board.
    pub fn place_fleet(&mut self, layout: &[Vec<Coordinate>], fleet: &FleetConfig) -> Result<()> {
        if self.placed {
            return Err(FleetError::InvalidPlacement(format!(
                "{} has already placed a fleet",
                self.owner
            )));
        }
        placement::validate_layout(layout, fleet)?;

        for (idx, ship_cells) in layout.iter().enumerate() {
            let id = ShipId(idx as u8);
            for coord in ship_cells {
                let cell = &mut self.cells[coord.index()];
                cell.state = CellState::Occupied;
                cell.ship = Some(id);
            }
            self.ships.push(Ship::new(id, ship_cells.clone()));
        }
        self.placed = true;

        tracing::debug!(owner = %self.owner, ships = self.ships.len(), "fleet placed");
        Ok(())
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        if coord.in_bounds() {
            self.cells.get(coord.index())
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        if coord.in_bounds() {
            self.cells.get_mut(coord.index())
        } else {
            None
        }
    }

    /// Every cell with its coordinate, row-major
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &Cell)> {
        Coordinate::all().zip(self.cells.iter())
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut Cell)> {
        Coordinate::all().zip(self.cells.iter_mut())
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0 as usize)
    }

    /// Cells of the given set that still hold an un-hit ship segment
    pub fn occupied_in(&self, coords: &[Coordinate]) -> Vec<Coordinate> {
        coords
            .iter()
            .copied()
            .filter(|&c| matches!(self.cell(c), Some(cell) if cell.state == CellState::Occupied))
            .collect()
    }

    /// Cells of the given set that have not been hit or missed yet
    pub fn unresolved_in(&self, coords: &[Coordinate]) -> Vec<Coordinate> {
        coords
            .iter()
            .copied()
            .filter(|&c| matches!(self.cell(c), Some(cell) if !cell.state.is_resolved()))
            .collect()
    }

    /// Resolve a strike on one cell, updating the owning ship
    pub(crate) fn strike(&mut self, coord: Coordinate) -> Result<CellDelta> {
        let cell = self.cell_mut(coord).ok_or_else(|| {
            FleetError::InvariantViolation(format!("strike at {} is off the board", coord))
        })?;
        let before = cell.state;
        let after = cell.strike();
        let ship = cell.ship;

        let mut sunk = false;
        if before == CellState::Occupied {
            let id = ship.ok_or_else(|| {
                FleetError::InvariantViolation(format!("occupied cell {} has no ship", coord))
            })?;
            let ship = self.ships.get_mut(id.0 as usize).ok_or_else(|| {
                FleetError::InvariantViolation(format!("cell {} maps to unknown ship {:?}", coord, id))
            })?;
            sunk = ship.register_hit()?;
            if sunk {
                tracing::info!(owner = %self.owner, ship = id.0, "ship sunk");
            }
        }

        Ok(CellDelta {
            coord,
            before,
            after,
            ship,
            sunk,
        })
    }

    pub(crate) fn record_shot(&mut self) {
        self.shots_received += 1;
    }

    pub fn shots_received(&self) -> u32 {
        self.shots_received
    }

    /// Number of cells belonging to any ship, whatever their state
    pub fn ship_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.ship.is_some()).count()
    }

    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// True once a placed fleet has been completely sunk
    pub fn all_sunk(&self) -> bool {
        self.placed && self.ships.iter().all(|s| s.is_sunk())
    }

    pub fn stats(&self) -> BoardStats {
        let sunk = self.ships.iter().filter(|s| s.is_sunk()).count();
        BoardStats {
            ships_total: self.ships.len(),
            ships_sunk: sunk,
            ships_remaining: self.ships.len() - sunk,
            cells_hit: self.cells.iter().filter(|c| c.state == CellState::Hit).count(),
            cells_missed: self.cells.iter().filter(|c| c.state == CellState::Miss).count(),
            shots_received: self.shots_received,
        }
    }

    /// Check every structural invariant of the board
    pub fn verify(&self) -> Result<()> {
        let violation = |msg: String| {
            tracing::error!(owner = %self.owner, "{}", msg);
            Err(FleetError::InvariantViolation(msg))
        };

        for (coord, cell) in self.cells() {
            match (cell.ship, cell.state) {
                (None, CellState::Occupied | CellState::Hit) => {
                    return violation(format!("cell {} is {:?} without a ship", coord, cell.state));
                }
                (Some(id), CellState::Empty | CellState::Miss) => {
                    return violation(format!(
                        "cell {} belongs to ship {:?} but is {:?}",
                        coord, id, cell.state
                    ));
                }
                (Some(id), _) => {
                    let owns = self
                        .ship(id)
                        .map(|s| s.cells().contains(&coord))
                        .unwrap_or(false);
                    if !owns {
                        return violation(format!("cell {} maps to ship {:?} which does not list it", coord, id));
                    }
                }
                _ => {}
            }
            if let Some(entry) = cell.protection {
                if !entry.level.is_active() {
                    return violation(format!("cell {} holds an inactive protection entry", coord));
                }
            }
        }

        for ship in &self.ships {
            if ship.is_empty() {
                return violation(format!("ship {:?} has no cells", ship.id));
            }
            let hit_cells = ship
                .cells()
                .iter()
                .filter(|&&c| matches!(self.cell(c), Some(cell) if cell.state == CellState::Hit && cell.ship == Some(ship.id)))
                .count();
            if hit_cells != ship.hits() as usize {
                return violation(format!(
                    "ship {:?} counts {} hits but {} cells are hit",
                    ship.id,
                    ship.hits(),
                    hit_cells
                ));
            }
            if ship.is_sunk() != (hit_cells == ship.len()) {
                return violation(format!("ship {:?} sunk flag disagrees with its hits", ship.id));
            }
        }

        let listed: usize = self.ships.iter().map(|s| s.len()).sum();
        if listed != self.ship_cell_count() {
            return violation(format!(
                "fleet lists {} cells but {} cells carry a ship",
                listed,
                self.ship_cell_count()
            ));
        }

        Ok(())
    }
}
