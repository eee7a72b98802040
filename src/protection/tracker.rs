//! Protection tracker - time-limited Zeno defense entries on a player's own cells
//!
//! Entries live on the board's cells so they travel with the board; the
//! tracker owns the rules for writing, reading and expiring them.

use crate::board::Board;
use crate::core::config::ProtectionConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::Coordinate;
use crate::protection::level::{ProtectionEntry, ProtectionLevel};

#[derive(Debug, Clone, Default)]
pub struct ProtectionTracker {
    config: ProtectionConfig,
}

impl ProtectionTracker {
    pub fn new(config: ProtectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    /// Protect cells on the owner's board
    ///
    /// A new entry replaces whatever was on the cell; levels never stack.
    /// Applying `ProtectionLevel::None` clears the cells. Nothing is written if
    /// any cell is off the board.
    pub fn apply(
        &self,
        board: &mut Board,
        cells: &[Coordinate],
        level: ProtectionLevel,
    ) -> Result<()> {
        if let Some(coord) = cells.iter().find(|c| !c.in_bounds()) {
            return Err(FleetError::InvariantViolation(format!(
                "protection at {} is outside {}'s board",
                coord,
                board.owner()
            )));
        }

        let entry = level.is_active().then_some(ProtectionEntry {
            level,
            rounds_remaining: self.config.duration_rounds,
        });
        for &coord in cells {
            if let Some(cell) = board.cell_mut(coord) {
                cell.protection = entry;
            }
        }

        tracing::info!(
            owner = %board.owner(),
            cells = cells.len(),
            level = level.label(),
            "zeno protection applied"
        );
        Ok(())
    }

    /// Advance one owner turn boundary, returning the cells whose protection expired
    pub fn decay(&self, board: &mut Board) -> Vec<Coordinate> {
        let mut expired = Vec::new();
        for (coord, cell) in board.cells_mut() {
            if let Some(entry) = cell.protection.as_mut() {
                entry.rounds_remaining = entry.rounds_remaining.saturating_sub(1);
                if entry.rounds_remaining == 0 {
                    cell.protection = None;
                    expired.push(coord);
                }
            }
        }
        if !expired.is_empty() {
            tracing::info!(owner = %board.owner(), cells = expired.len(), "zeno protection expired");
        }
        expired
    }

    pub fn active_level(&self, board: &Board, coord: Coordinate) -> ProtectionLevel {
        board
            .cell(coord)
            .and_then(|cell| cell.protection)
            .map(|entry| entry.level)
            .unwrap_or(ProtectionLevel::None)
    }

    /// Strongest level across a set of cells, i.e. the one removing the most probability
    pub fn strongest_in(&self, board: &Board, cells: &[Coordinate]) -> ProtectionLevel {
        cells
            .iter()
            .map(|&c| self.active_level(board, c))
            .fold(ProtectionLevel::None, |best, level| {
                if level.factor(&self.config) > best.factor(&self.config) {
                    level
                } else {
                    best
                }
            })
    }

    /// Fraction of attack probability removed by the strongest protection in `cells`
    pub fn reduction_in(&self, board: &Board, cells: &[Coordinate]) -> f64 {
        self.strongest_in(board, cells).factor(&self.config)
    }
}
