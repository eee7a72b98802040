//! Weapon catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{FleetError, Result};
use crate::targeting::{RegionShape, TargetRegion};

/// Every action a player can take on their turn
///
/// Adding a weapon means adding a variant here and a case in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    /// Deterministic shell; hits whatever is there
    Classical,
    /// Amplitude amplification over the target region
    Grover,
    /// Elitzur-Vaidman interaction-free measurement
    EvScan,
    /// Measurement-induced freezing of the owner's own cells
    Zeno,
}

impl Weapon {
    pub const ALL: [Weapon; 4] = [Weapon::Classical, Weapon::Grover, Weapon::EvScan, Weapon::Zeno];

    /// True for weapons aimed at the opponent's board
    pub fn is_offensive(&self) -> bool {
        !matches!(self, Weapon::Zeno)
    }

    /// Whether this weapon can be used on a region of the given shape
    pub fn accepts(&self, shape: RegionShape) -> bool {
        match self {
            Weapon::Classical | Weapon::EvScan => true,
            // Amplification needs more than one candidate cell to search
            Weapon::Grover => !matches!(shape, RegionShape::Single),
            Weapon::Zeno => matches!(shape, RegionShape::Single | RegionShape::Square2x2),
        }
    }

    pub fn ensure_accepts(&self, region: &TargetRegion) -> Result<()> {
        if self.accepts(region.shape) {
            Ok(())
        } else {
            Err(FleetError::InvalidRegion(format!(
                "{} cannot target a {}",
                self, region.shape
            )))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Classical => "Classical Shot",
            Weapon::Grover => "Grover Shot",
            Weapon::EvScan => "EV Scan",
            Weapon::Zeno => "Zeno Defense",
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weapon {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classical" | "shot" => Ok(Weapon::Classical),
            "grover" => Ok(Weapon::Grover),
            "ev" | "ev_scan" | "scan" => Ok(Weapon::EvScan),
            "zeno" | "defense" => Ok(Weapon::Zeno),
            other => Err(FleetError::InvalidRegion(format!("unknown weapon '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_table() {
        use RegionShape::*;
        for shape in [Single, Square2x2, Row, Column] {
            assert!(Weapon::Classical.accepts(shape));
            assert!(Weapon::EvScan.accepts(shape));
        }
        assert!(!Weapon::Grover.accepts(Single));
        assert!(Weapon::Grover.accepts(Square2x2));
        assert!(Weapon::Grover.accepts(Row));
        assert!(Weapon::Zeno.accepts(Square2x2));
        assert!(!Weapon::Zeno.accepts(Column));
    }

    #[test]
    fn test_only_zeno_is_defensive() {
        assert_eq!(Weapon::ALL.iter().filter(|w| !w.is_offensive()).count(), 1);
        assert!(!Weapon::Zeno.is_offensive());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Grover".parse::<Weapon>().unwrap(), Weapon::Grover);
        assert_eq!("scan".parse::<Weapon>().unwrap(), Weapon::EvScan);
        assert!("laser".parse::<Weapon>().is_err());
    }
}
