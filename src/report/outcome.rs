//! Outcome reporter - turns resolver results into display-ready summaries
//!
//! Pure functions only: no randomness, no board access.

use serde::Serialize;
use std::fmt;

use crate::core::types::Coordinate;
use crate::protection::ProtectionLevel;
use crate::weapons::{AttackResult, DefenseResult, Outcome, Weapon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportCategory {
    Hit,
    Miss,
    Detected,
    Interaction,
    Inconclusive,
    Clear,
    Protected,
}

impl ReportCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Hit => "HIT",
            ReportCategory::Miss => "MISS",
            ReportCategory::Detected => "DETECTED",
            ReportCategory::Interaction => "INTERACTION",
            ReportCategory::Inconclusive => "INCONCLUSIVE",
            ReportCategory::Clear => "CLEAR",
            ReportCategory::Protected => "PROTECTED",
        }
    }
}

impl From<Outcome> for ReportCategory {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Hit => ReportCategory::Hit,
            Outcome::Miss => ReportCategory::Miss,
            Outcome::Detected => ReportCategory::Detected,
            Outcome::Interaction => ReportCategory::Interaction,
            Outcome::Inconclusive => ReportCategory::Inconclusive,
            Outcome::Clear => ReportCategory::Clear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub category: ReportCategory,
    /// Cells the caller should highlight
    pub coords: Vec<Coordinate>,
    pub ships_sunk: usize,
    pub message: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category.label(), self.message)
    }
}

/// Summarise an attack
pub fn report(result: &AttackResult) -> Report {
    let category = ReportCategory::from(result.outcome);
    let sunk = result.sunk_ships().len();
    let hits = result.hit_cells();
    let region = result.region.cells().to_vec();

    let coords = match result.outcome {
        Outcome::Hit | Outcome::Interaction => hits.clone(),
        Outcome::Miss => match result.measured {
            Some(cell) => vec![cell],
            None => result.deltas.iter().map(|d| d.coord).collect(),
        },
        // Interaction-free measurements only localise to the region
        Outcome::Detected | Outcome::Inconclusive | Outcome::Clear => region,
    };

    let mut message = match (result.weapon, result.outcome) {
        (Weapon::Classical, Outcome::Hit) => {
            format!("Classical shot struck {} ship cell(s).", hits.len())
        }
        (Weapon::Classical, _) => "Classical shot found only open water.".to_string(),
        (Weapon::Grover, Outcome::Hit) => format!(
            "Grover amplification collapsed onto a ship at {}!",
            join(&hits)
        ),
        (Weapon::Grover, _) if result.protection.is_active() => format!(
            "Zeno freezing ({}) deflected the Grover shot; measurement landed on {}.",
            result.protection.label(),
            describe(result.measured)
        ),
        (Weapon::Grover, _) => format!(
            "Grover search measured {} and found nothing.",
            describe(result.measured)
        ),
        (Weapon::EvScan, Outcome::Detected) => format!(
            "EV scan detected a ship somewhere in the {} without touching it.",
            result.region.shape
        ),
        (Weapon::EvScan, Outcome::Interaction) => format!(
            "EV probe interacted with a ship and damaged {}.",
            join(&hits)
        ),
        (Weapon::EvScan, Outcome::Clear) => format!(
            "EV scan shows perfect interference: the {} is clear.",
            result.region.shape
        ),
        (Weapon::EvScan, _) => {
            "EV scan inconclusive; interference gave no clear answer.".to_string()
        }
        (Weapon::Zeno, _) => "Zeno defense does not attack.".to_string(),
    };

    if sunk > 0 {
        message.push_str(&format!(" {} ship(s) sunk.", sunk));
    }

    Report {
        category,
        coords,
        ships_sunk: sunk,
        message,
    }
}

/// Summarise a defense
pub fn report_defense(result: &DefenseResult) -> Report {
    let strength = match result.level {
        ProtectionLevel::Maximum => "maximum",
        ProtectionLevel::Partial => "partial",
        ProtectionLevel::None => "no",
    };
    Report {
        category: ReportCategory::Protected,
        coords: result.cells.clone(),
        ships_sunk: 0,
        message: format!(
            "Zeno defense froze {} cell(s) with {} protection for {} round(s).",
            result.cells.len(),
            strength,
            result.rounds
        ),
    }
}

fn describe(cell: Option<Coordinate>) -> String {
    cell.map(|c| c.to_string())
        .unwrap_or_else(|| "empty space".to_string())
}

fn join(cells: &[Coordinate]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CellDelta, CellState};
    use crate::core::types::{PlayerId, ShipId};
    use crate::targeting::{RegionSelector, RegionShape};

    fn result(weapon: Weapon, outcome: Outcome, deltas: Vec<CellDelta>) -> AttackResult {
        AttackResult {
            weapon,
            attacker: PlayerId::One,
            defender: PlayerId::Two,
            region: RegionSelector::default()
                .resolve(RegionShape::Square2x2, Coordinate::new(2, 2))
                .unwrap(),
            deltas,
            outcome,
            protection: ProtectionLevel::None,
            probability: Some(0.85),
            measured: None,
        }
    }

    fn sinking_hit() -> CellDelta {
        CellDelta {
            coord: Coordinate::new(3, 3),
            before: CellState::Occupied,
            after: CellState::Hit,
            ship: Some(ShipId(0)),
            sunk: true,
        }
    }

    #[test]
    fn test_hit_report() {
        let report = report(&result(Weapon::Grover, Outcome::Hit, vec![sinking_hit()]));
        assert_eq!(report.category, ReportCategory::Hit);
        assert_eq!(report.coords, vec![Coordinate::new(3, 3)]);
        assert_eq!(report.ships_sunk, 1);
        assert!(report.message.contains("sunk"));
    }

    #[test]
    fn test_scan_reports_whole_region() {
        let report = report(&result(Weapon::EvScan, Outcome::Detected, vec![]));
        assert_eq!(report.category, ReportCategory::Detected);
        assert_eq!(report.coords.len(), 4);
    }

    #[test]
    fn test_protected_grover_miss_mentions_zeno() {
        let mut attack = result(Weapon::Grover, Outcome::Miss, vec![]);
        attack.protection = ProtectionLevel::Maximum;
        attack.measured = Some(Coordinate::new(2, 3));
        let report = report(&attack);
        assert_eq!(report.category, ReportCategory::Miss);
        assert!(report.message.contains("Zeno"));
        assert_eq!(report.coords, vec![Coordinate::new(2, 3)]);
    }

    #[test]
    fn test_report_is_pure() {
        let attack = result(Weapon::EvScan, Outcome::Clear, vec![]);
        assert_eq!(report(&attack), report(&attack));
    }

    #[test]
    fn test_defense_report() {
        let defense = DefenseResult {
            owner: PlayerId::One,
            cells: vec![Coordinate::new(0, 0)],
            level: ProtectionLevel::Maximum,
            rounds: 1,
        };
        let report = report_defense(&defense);
        assert_eq!(report.category, ReportCategory::Protected);
        assert_eq!(report.to_string(), "[PROTECTED] Zeno defense froze 1 cell(s) with maximum protection for 1 round(s).");
    }
}
