//! Region selection: targeting mode + anchor cell -> concrete coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::config::{RegionConfig, SquareEdgePolicy};
use crate::core::error::{FleetError, Result};
use crate::core::types::{Coordinate, BOARD_SIZE};

/// Targeting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionShape {
    Single,
    Square2x2,
    Row,
    Column,
}

impl FromStr for RegionShape {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "cell" => Ok(RegionShape::Single),
            "square" | "square2x2" | "2x2" => Ok(RegionShape::Square2x2),
            "row" => Ok(RegionShape::Row),
            "column" | "col" => Ok(RegionShape::Column),
            other => Err(FleetError::InvalidRegion(format!("unknown targeting mode '{}'", other))),
        }
    }
}

impl fmt::Display for RegionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionShape::Single => "single cell",
            RegionShape::Square2x2 => "2x2 square",
            RegionShape::Row => "row",
            RegionShape::Column => "column",
        };
        write!(f, "{}", name)
    }
}

/// A resolved, in-bounds set of target cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRegion {
    pub shape: RegionShape,
    /// Anchor after any clamping
    pub anchor: Coordinate,
    cells: Vec<Coordinate>,
}

impl TargetRegion {
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Re-check a region handed in from outside the engine
    ///
    /// The cells must be exactly what the selector produces for this shape
    /// and anchor under either square edge policy.
    pub fn validate(&self) -> Result<()> {
        if self.cells.is_empty() {
            return Err(FleetError::InvalidRegion("region has no cells".into()));
        }
        if let Some(coord) = self.cells.iter().find(|c| !c.in_bounds()) {
            return Err(FleetError::InvalidRegion(format!("cell {} is off the board", coord)));
        }

        let mut cells = self.cells.clone();
        cells.sort_unstable();
        if cells.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(FleetError::InvalidRegion(format!(
                "{} region lists a cell more than once",
                self.shape
            )));
        }

        let matches_shape = [SquareEdgePolicy::Clamp, SquareEdgePolicy::Clip]
            .into_iter()
            .filter_map(|policy| RegionSelector::new(policy).resolve(self.shape, self.anchor).ok())
            .any(|expected| {
                let mut expected = expected.cells;
                expected.sort_unstable();
                expected == cells
            });
        if !matches_shape {
            return Err(FleetError::InvalidRegion(format!(
                "cells do not form a {} anchored at {}",
                self.shape, self.anchor
            )));
        }
        Ok(())
    }
}

/// Maps targeting modes onto board coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSelector {
    policy: SquareEdgePolicy,
}

impl RegionSelector {
    pub fn new(policy: SquareEdgePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &RegionConfig) -> Self {
        Self::new(config.square_edge)
    }

    /// Resolve a targeting mode around an anchor
    ///
    /// Row and Column modes only read the anchor's row or column respectively.
    pub fn resolve(&self, shape: RegionShape, anchor: Coordinate) -> Result<TargetRegion> {
        let relevant_in_bounds = match shape {
            RegionShape::Row => anchor.row < BOARD_SIZE,
            RegionShape::Column => anchor.col < BOARD_SIZE,
            RegionShape::Single | RegionShape::Square2x2 => anchor.in_bounds(),
        };
        if !relevant_in_bounds {
            return Err(FleetError::InvalidRegion(format!(
                "anchor {} is off the board for a {} target",
                anchor, shape
            )));
        }

        let (anchor, cells) = match shape {
            RegionShape::Single => (anchor, vec![anchor]),
            RegionShape::Row => (
                Coordinate::new(anchor.row, 0),
                (0..BOARD_SIZE).map(|col| Coordinate::new(anchor.row, col)).collect(),
            ),
            RegionShape::Column => (
                Coordinate::new(0, anchor.col),
                (0..BOARD_SIZE).map(|row| Coordinate::new(row, anchor.col)).collect(),
            ),
            RegionShape::Square2x2 => self.square(anchor),
        };

        Ok(TargetRegion {
            shape,
            anchor,
            cells,
        })
    }


    fn square(&self, anchor: Coordinate) -> (Coordinate, Vec<Coordinate>) {
        let anchor = match self.policy {
            SquareEdgePolicy::Clamp => Coordinate::new(
                anchor.row.min(BOARD_SIZE - 2),
                anchor.col.min(BOARD_SIZE - 2),
            ),
            SquareEdgePolicy::Clip => anchor,
        };
        let cells = (0..2u8)
            .flat_map(|dr| (0..2u8).map(move |dc| Coordinate::new(anchor.row + dr, anchor.col + dc)))
            .filter(|c| c.in_bounds())
            .collect();
        (anchor, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clamp() -> RegionSelector {
        RegionSelector::new(SquareEdgePolicy::Clamp)
    }

    #[test]
    fn test_single() {
        let region = clamp().resolve(RegionShape::Single, Coordinate::new(4, 6)).unwrap();
        assert_eq!(region.cells(), &[Coordinate::new(4, 6)]);
    }

    #[test]
    fn test_square_interior() {
        let region = clamp().resolve(RegionShape::Square2x2, Coordinate::new(2, 2)).unwrap();
        assert_eq!(
            region.cells(),
            &[
                Coordinate::new(2, 2),
                Coordinate::new(2, 3),
                Coordinate::new(3, 2),
                Coordinate::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_square_clamps_at_edge() {
        let region = clamp().resolve(RegionShape::Square2x2, Coordinate::new(7, 7)).unwrap();
        assert_eq!(region.len(), 4);
        assert_eq!(region.anchor, Coordinate::new(6, 6));
        assert!(region.contains(Coordinate::new(7, 7)));
    }

    #[test]
    fn test_square_clips_at_edge() {
        let selector = RegionSelector::new(SquareEdgePolicy::Clip);
        let corner = selector.resolve(RegionShape::Square2x2, Coordinate::new(7, 7)).unwrap();
        assert_eq!(corner.cells(), &[Coordinate::new(7, 7)]);

        let side = selector.resolve(RegionShape::Square2x2, Coordinate::new(3, 7)).unwrap();
        assert_eq!(side.len(), 2);
    }

    #[test]
    fn test_row_and_column_ignore_orthogonal_coordinate() {
        let row = clamp().resolve(RegionShape::Row, Coordinate::new(5, 200)).unwrap();
        assert_eq!(row.len(), 8);
        assert!(row.cells().iter().all(|c| c.row == 5));

        let column = clamp().resolve(RegionShape::Column, Coordinate::new(3, 1)).unwrap();
        assert_eq!(column.len(), 8);
        assert!(column.cells().iter().all(|c| c.col == 1));
    }

    #[test]
    fn test_out_of_bounds_anchor() {
        for shape in [RegionShape::Single, RegionShape::Square2x2] {
            let result = clamp().resolve(shape, Coordinate::new(8, 0));
            assert!(matches!(result, Err(FleetError::InvalidRegion(_))));
        }
        assert!(clamp().resolve(RegionShape::Row, Coordinate::new(9, 0)).is_err());
        assert!(clamp().resolve(RegionShape::Column, Coordinate::new(0, 9)).is_err());
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!("square".parse::<RegionShape>().unwrap(), RegionShape::Square2x2);
        assert_eq!("COL".parse::<RegionShape>().unwrap(), RegionShape::Column);
        assert!("diagonal".parse::<RegionShape>().is_err());
    }


    #[test]
    fn test_validate_rejects_foreign_cells() {
        let region = TargetRegion {
            shape: RegionShape::Single,
            anchor: Coordinate::new(0, 0),
            cells: vec![Coordinate::new(8, 8)],
        };
        assert!(region.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_scattered_square() {
        let region = TargetRegion {
            shape: RegionShape::Square2x2,
            anchor: Coordinate::new(0, 0),
            cells: vec![
                Coordinate::new(0, 0),
                Coordinate::new(3, 3),
                Coordinate::new(5, 5),
                Coordinate::new(7, 7),
            ],
        };
        assert!(matches!(region.validate(), Err(FleetError::InvalidRegion(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_cells() {
        let region = TargetRegion {
            shape: RegionShape::Square2x2,
            anchor: Coordinate::new(2, 2),
            cells: vec![
                Coordinate::new(2, 2),
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
                Coordinate::new(3, 3),
            ],
        };
        assert!(matches!(region.validate(), Err(FleetError::InvalidRegion(_))));
    }

    #[test]
    fn test_validate_accepts_selector_output() {
        for policy in [SquareEdgePolicy::Clamp, SquareEdgePolicy::Clip] {
            let selector = RegionSelector::new(policy);
            for (shape, anchor) in [
                (RegionShape::Single, Coordinate::new(4, 6)),
                (RegionShape::Square2x2, Coordinate::new(7, 7)),
                (RegionShape::Square2x2, Coordinate::new(3, 7)),
                (RegionShape::Row, Coordinate::new(5, 200)),
                (RegionShape::Column, Coordinate::new(0, 2)),
            ] {
                let region = selector.resolve(shape, anchor).unwrap();
                assert!(region.validate().is_ok(), "{:?} at {}", shape, anchor);
            }
        }
    }
}
