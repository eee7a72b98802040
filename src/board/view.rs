//! Read-only board snapshots for rendering

use serde::Serialize;
use std::fmt;

use crate::board::cell::CellState;
use crate::board::model::{Board, BoardStats};
use crate::board::ship::ShipStatus;
use crate::core::types::{Coordinate, PlayerId, ShipId, BOARD_SIZE};
use crate::protection::ProtectionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub coord: Coordinate,
    pub state: CellState,
    pub protection: Option<ProtectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipView {
    pub id: ShipId,
    pub cells: Vec<Coordinate>,
    pub hits: u8,
    pub status: ShipStatus,
}

/// Detached copy of a board's visible state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub owner: PlayerId,
    /// Row-major, one entry per cell
    pub cells: Vec<CellView>,
    pub ships: Vec<ShipView>,
    pub stats: BoardStats,
}

/// Take a read-only snapshot of a board
pub fn snapshot(board: &Board) -> BoardView {
    BoardView {
        owner: board.owner(),
        cells: board
            .cells()
            .map(|(coord, cell)| CellView {
                coord,
                state: cell.state,
                protection: cell.protection,
            })
            .collect(),
        ships: board
            .ships()
            .iter()
            .map(|ship| ShipView {
                id: ship.id,
                cells: ship.cells().to_vec(),
                hits: ship.hits(),
                status: ship.status(),
            })
            .collect(),
        stats: board.stats(),
    }
}

impl BoardView {
    pub fn cell(&self, coord: Coordinate) -> Option<&CellView> {
        if coord.in_bounds() {
            self.cells.get(coord.index())
        } else {
            None
        }
    }

    /// The view an opponent is allowed to see
    ///
    /// Un-hit ship cells read as empty, protection is hidden, and only sunk
    /// ships are listed.
    pub fn concealed(&self) -> BoardView {
        BoardView {
            owner: self.owner,
            cells: self
                .cells
                .iter()
                .map(|cell| CellView {
                    coord: cell.coord,
                    state: match cell.state {
                        CellState::Occupied => CellState::Empty,
                        other => other,
                    },
                    protection: None,
                })
                .collect(),
            ships: self
                .ships
                .iter()
                .filter(|s| s.status == ShipStatus::Sunk)
                .cloned()
                .collect(),
            stats: self.stats,
        }
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {} ", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, " {} ", row)?;
            for col in 0..BOARD_SIZE {
                let Some(cell) = self.cell(Coordinate::new(row, col)) else {
                    continue;
                };
                let symbol = match cell.state {
                    CellState::Empty => '.',
                    CellState::Occupied => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                let marker = if cell.protection.is_some() { '*' } else { ' ' };
                write!(f, " {}{}", symbol, marker)?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{}: {}/{} ships afloat",
            self.owner, self.stats.ships_remaining, self.stats.ships_total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FleetConfig;

    fn board() -> Board {
        let mut board = Board::new(PlayerId::One);
        board
            .place_fleet(
                &[vec![Coordinate::new(1, 1)], vec![Coordinate::new(5, 5)]],
                &FleetConfig {
                    ship_sizes: vec![1, 1],
                },
            )
            .unwrap();
        board
    }

    #[test]
    fn test_snapshot_mirrors_board() {
        let view = snapshot(&board());
        assert_eq!(view.cells.len(), 64);
        assert_eq!(view.cell(Coordinate::new(1, 1)).unwrap().state, CellState::Occupied);
        assert_eq!(view.ships.len(), 2);
        assert_eq!(view.stats.ships_remaining, 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut board = board();
        let before = snapshot(&board);
        board.strike(Coordinate::new(1, 1)).unwrap();
        assert_eq!(before.cell(Coordinate::new(1, 1)).unwrap().state, CellState::Occupied);
        assert_ne!(before, snapshot(&board));
    }

    #[test]
    fn test_concealed_hides_ships() {
        let mut board = board();
        board.strike(Coordinate::new(5, 5)).unwrap();
        let hidden = snapshot(&board).concealed();
        assert_eq!(hidden.cell(Coordinate::new(1, 1)).unwrap().state, CellState::Empty);
        assert_eq!(hidden.cell(Coordinate::new(5, 5)).unwrap().state, CellState::Hit);
        assert_eq!(hidden.ships.len(), 1);
        assert_eq!(hidden.ships[0].id, ShipId(1));
    }

    #[test]
    fn test_display_renders_grid() {
        let rendered = snapshot(&board()).to_string();
        assert!(rendered.contains(" S "));
        assert!(rendered.contains("2/2 ships afloat"));
    }
}
