//! Fleet placement validation and seeded random placement
//!
//! Placement itself belongs to the game-flow layer, but the board refuses any
//! layout that would break its invariants: ships must be in bounds, straight,
//! contiguous, non-overlapping, and match the configured manifest.

use std::collections::HashSet;

use rand::Rng;

use crate::core::config::FleetConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::{Coordinate, BOARD_SIZE};

/// Attempts per ship before random placement gives up
const MAX_PLACEMENT_ATTEMPTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Cells covered by a straight ship starting at `origin`
pub fn ship_cells(origin: Coordinate, length: u8, orientation: Orientation) -> Vec<Coordinate> {
    (0..length)
        .map(|offset| match orientation {
            Orientation::Horizontal => Coordinate::new(origin.row, origin.col.saturating_add(offset)),
            Orientation::Vertical => Coordinate::new(origin.row.saturating_add(offset), origin.col),
        })
        .collect()
}

/// Check a complete layout against the manifest and the board geometry
pub fn validate_layout(layout: &[Vec<Coordinate>], fleet: &FleetConfig) -> Result<()> {
    let mut expected: Vec<u8> = fleet.ship_sizes.clone();
    let mut actual: Vec<u8> = layout.iter().map(|s| s.len() as u8).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    if expected != actual {
        return Err(FleetError::InvalidPlacement(format!(
            "ship lengths {:?} do not match manifest {:?}",
            actual, expected
        )));
    }

    let mut taken = HashSet::new();
    for (idx, ship) in layout.iter().enumerate() {
        validate_ship(ship).map_err(|reason| {
            FleetError::InvalidPlacement(format!("ship {}: {}", idx, reason))
        })?;
        for coord in ship {
            if !taken.insert(*coord) {
                return Err(FleetError::InvalidPlacement(format!(
                    "ship {} overlaps another ship at {}",
                    idx, coord
                )));
            }
        }
    }
    Ok(())
}

/// A ship must be a non-empty, in-bounds, straight run of adjacent cells
fn validate_ship(cells: &[Coordinate]) -> std::result::Result<(), String> {
    if cells.is_empty() {
        return Err("has no cells".into());
    }
    if let Some(coord) = cells.iter().find(|c| !c.in_bounds()) {
        return Err(format!("cell {} is off the board", coord));
    }

    let mut sorted = cells.to_vec();
    sorted.sort_unstable();
    let same_row = sorted.iter().all(|c| c.row == sorted[0].row);
    let same_col = sorted.iter().all(|c| c.col == sorted[0].col);
    if !same_row && !same_col {
        return Err("is not axis-aligned".into());
    }
    if sorted.windows(2).any(|pair| pair[0].distance(&pair[1]) != 1) {
        return Err("is not contiguous".into());
    }
    Ok(())
}

/// Generate a valid layout for the manifest, in manifest order
pub fn random_fleet(fleet: &FleetConfig, rng: &mut impl Rng) -> Result<Vec<Vec<Coordinate>>> {
    let mut order: Vec<usize> = (0..fleet.ship_sizes.len()).collect();
    // Longest ships first leaves the most room for the rest
    order.sort_by_key(|&idx| std::cmp::Reverse(fleet.ship_sizes[idx]));

    let mut taken: HashSet<Coordinate> = HashSet::new();
    let mut layout: Vec<Vec<Coordinate>> = vec![Vec::new(); fleet.ship_sizes.len()];

    for idx in order {
        let length = fleet.ship_sizes[idx];
        if length == 0 || length > BOARD_SIZE {
            return Err(FleetError::InvalidPlacement(format!(
                "ship length {} cannot be placed",
                length
            )));
        }
        let cells = (0..MAX_PLACEMENT_ATTEMPTS)
            .find_map(|_| {
                let orientation = if rng.gen_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let span = BOARD_SIZE - length + 1;
                let origin = match orientation {
                    Orientation::Horizontal => {
                        Coordinate::new(rng.gen_range(0..BOARD_SIZE), rng.gen_range(0..span))
                    }
                    Orientation::Vertical => {
                        Coordinate::new(rng.gen_range(0..span), rng.gen_range(0..BOARD_SIZE))
                    }
                };
                let cells = ship_cells(origin, length, orientation);
                cells.iter().all(|c| !taken.contains(c)).then_some(cells)
            })
            .ok_or_else(|| {
                FleetError::InvalidPlacement(format!(
                    "could not fit ship of length {} after {} attempts",
                    length, MAX_PLACEMENT_ATTEMPTS
                ))
            })?;
        taken.extend(cells.iter().copied());
        layout[idx] = cells;
    }

    Ok(layout)
}
