//! Weapon resolver - the single entry point for attacks and defenses
//!
//! Resolution runs in two steps: the weapon case reads the boards and samples
//! an outcome without touching anything, then the outcome is applied to the
//! defender's board in one pass. Validation failures leave every board as it
//! was.

use rand::Rng;

use crate::board::Board;
use crate::core::config::EngineConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::Coordinate;
use crate::protection::{ProtectionLevel, ProtectionTracker};
use crate::targeting::TargetRegion;
use crate::weapons::kind::Weapon;
use crate::weapons::result::{AttackResult, DefenseResult, Resolution};
use crate::weapons::{classical, ev_scan, grover};

#[derive(Debug, Clone)]
pub struct WeaponResolver {
    config: EngineConfig,
    tracker: ProtectionTracker,
}

impl WeaponResolver {
    pub fn new(config: EngineConfig) -> Self {
        let tracker = ProtectionTracker::new(config.protection.clone());
        Self { config, tracker }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ProtectionTracker {
        &self.tracker
    }

    /// Fire an offensive weapon at the defender's board
    ///
    /// The attacker's board is only read; the defender's board is the only one
    /// that can change.
    pub fn resolve_attack(
        &self,
        weapon: Weapon,
        attacker: &Board,
        defender: &mut Board,
        region: &TargetRegion,
        rng: &mut impl Rng,
    ) -> Result<AttackResult> {
        if attacker.owner() == defender.owner() {
            return Err(FleetError::InvariantViolation(format!(
                "{} is attacking their own board",
                attacker.owner()
            )));
        }
        region.validate()?;
        weapon.ensure_accepts(region)?;
        if defender.unresolved_in(region.cells()).is_empty() {
            return Err(FleetError::AlreadyTargeted);
        }

        let resolution = match weapon {
            Weapon::Classical => classical::resolve(defender, region),
            Weapon::Grover => grover::resolve(
                defender,
                region,
                &self.tracker,
                &self.config.grover,
                rng,
            ),
            Weapon::EvScan => ev_scan::resolve(
                defender,
                region,
                &self.tracker,
                &self.config.ev_scan,
                rng,
            ),
            Weapon::Zeno => {
                return Err(FleetError::InvalidRegion(format!(
                    "{} protects its owner's board and cannot target an opponent",
                    weapon
                )))
            }
        };

        let result = apply(weapon, attacker, defender, region, resolution)?;
        tracing::debug!(
            weapon = weapon.name(),
            attacker = %result.attacker,
            outcome = ?result.outcome,
            damaged = result.damaged(),
            "attack resolved"
        );
        Ok(result)
    }

    /// Raise Zeno protection over cells of the owner's own board
    pub fn resolve_defense(
        &self,
        board: &mut Board,
        cells: &[Coordinate],
        level: ProtectionLevel,
    ) -> Result<DefenseResult> {
        if cells.is_empty() {
            return Err(FleetError::InvalidRegion("defense needs at least one cell".into()));
        }
        if !level.is_active() {
            return Err(FleetError::InvalidRegion(
                "defense needs a Partial or Maximum level".into(),
            ));
        }
        self.tracker.apply(board, cells, level)?;

        Ok(DefenseResult {
            owner: board.owner(),
            cells: cells.to_vec(),
            level,
            rounds: self.tracker.config().duration_rounds,
        })
    }

    /// Expire protection on a board at its owner's turn boundary
    pub fn turn_boundary(&self, board: &mut Board) -> Vec<Coordinate> {
        self.tracker.decay(board)
    }
}

fn apply(
    weapon: Weapon,
    attacker: &Board,
    defender: &mut Board,
    region: &TargetRegion,
    resolution: Resolution,
) -> Result<AttackResult> {
    let ship_cells_before = defender.ship_cell_count();

    let mut deltas = Vec::with_capacity(resolution.strikes.len());
    for coord in &resolution.strikes {
        let delta = defender.strike(*coord)?;
        if delta.before != delta.after {
            deltas.push(delta);
        }
    }
    defender.record_shot();

    if defender.ship_cell_count() != ship_cells_before {
        return Err(FleetError::InvariantViolation(format!(
            "{}'s ship cell count changed from {} to {}",
            defender.owner(),
            ship_cells_before,
            defender.ship_cell_count()
        )));
    }
    defender.verify()?;

    Ok(AttackResult {
        weapon,
        attacker: attacker.owner(),
        defender: defender.owner(),
        region: region.clone(),
        deltas,
        outcome: resolution.outcome,
        protection: resolution.protection,
        probability: resolution.probability,
        measured: resolution.measured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;
    use crate::core::config::FleetConfig;
    use crate::core::types::PlayerId;
    use crate::targeting::{RegionSelector, RegionShape};
    use crate::weapons::result::Outcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn boards() -> (Board, Board) {
        let fleet = FleetConfig {
            ship_sizes: vec![2, 1],
        };
        let mut one = Board::new(PlayerId::One);
        one.place_fleet(
            &[vec![Coordinate::new(0, 0), Coordinate::new(0, 1)], vec![Coordinate::new(7, 7)]],
            &fleet,
        )
        .unwrap();
        let mut two = Board::new(PlayerId::Two);
        two.place_fleet(
            &[vec![Coordinate::new(4, 4), Coordinate::new(5, 4)], vec![Coordinate::new(2, 6)]],
            &fleet,
        )
        .unwrap();
        (one, two)
    }

    fn region(shape: RegionShape, row: u8, col: u8) -> TargetRegion {
        RegionSelector::default().resolve(shape, Coordinate::new(row, col)).unwrap()
    }

    #[test]
    fn test_classical_hit_and_sink() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = resolver
            .resolve_attack(Weapon::Classical, &one, &mut two, &region(RegionShape::Single, 2, 6), &mut rng)
            .unwrap();
        assert_eq!(result.outcome, Outcome::Hit);
        assert_eq!(result.sunk_ships().len(), 1);
        assert_eq!(result.defender, PlayerId::Two);
        assert_eq!(two.shots_received(), 1);
    }

    #[test]
    fn test_classical_area_marks_misses() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = resolver
            .resolve_attack(Weapon::Classical, &one, &mut two, &region(RegionShape::Square2x2, 4, 3), &mut rng)
            .unwrap();
        assert_eq!(result.outcome, Outcome::Hit);
        assert_eq!(result.deltas.len(), 4);
        assert_eq!(result.hit_cells(), vec![Coordinate::new(4, 4), Coordinate::new(5, 4)]);
        assert_eq!(two.cell(Coordinate::new(4, 3)).unwrap().state, CellState::Miss);
    }

    #[test]
    fn test_zeno_is_not_an_attack() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = resolver.resolve_attack(Weapon::Zeno, &one, &mut two, &region(RegionShape::Single, 0, 0), &mut rng);
        assert!(matches!(result, Err(FleetError::InvalidRegion(_))));
    }

    #[test]
    fn test_self_attack_is_fatal() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, _) = boards();
        let mut same = one.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = resolver
            .resolve_attack(Weapon::Classical, &one, &mut same, &region(RegionShape::Single, 0, 0), &mut rng)
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_exhausted_region_is_rejected_without_mutation() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let target = region(RegionShape::Single, 3, 3);
        resolver.resolve_attack(Weapon::Classical, &one, &mut two, &target, &mut rng).unwrap();

        let shots = two.shots_received();
        let again = resolver.resolve_attack(Weapon::Classical, &one, &mut two, &target, &mut rng);
        assert!(matches!(again, Err(FleetError::AlreadyTargeted)));
        assert_eq!(two.shots_received(), shots);
    }

    #[test]
    fn test_grover_rejects_single_cell() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = resolver.resolve_attack(Weapon::Grover, &one, &mut two, &region(RegionShape::Single, 4, 4), &mut rng);
        assert!(matches!(result, Err(FleetError::InvalidRegion(_))));
        assert_eq!(two.shots_received(), 0);
    }

    #[test]
    fn test_grover_miss_leaves_cells_untouched() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = resolver
            .resolve_attack(Weapon::Grover, &one, &mut two, &region(RegionShape::Row, 6, 0), &mut rng)
            .unwrap();
        assert_eq!(result.outcome, Outcome::Miss);
        assert!(result.deltas.is_empty());
        assert_eq!(two.stats().cells_missed, 0);
        assert_eq!(two.shots_received(), 1);
    }

    #[test]
    fn test_defense_applies_protection() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (mut one, _) = boards();
        let cells = [Coordinate::new(0, 0), Coordinate::new(0, 1)];
        let result = resolver
            .resolve_defense(&mut one, &cells, ProtectionLevel::Maximum)
            .unwrap();
        assert_eq!(result.rounds, 1);
        assert_eq!(resolver.tracker().active_level(&one, cells[1]), ProtectionLevel::Maximum);

        assert_eq!(resolver.turn_boundary(&mut one).len(), 2);
        assert_eq!(resolver.tracker().active_level(&one, cells[1]), ProtectionLevel::None);
    }

    #[test]
    fn test_defense_rejects_none_and_empty() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (mut one, _) = boards();
        assert!(resolver.resolve_defense(&mut one, &[], ProtectionLevel::Partial).is_err());
        assert!(resolver
            .resolve_defense(&mut one, &[Coordinate::new(1, 1)], ProtectionLevel::None)
            .is_err());
    }

    #[test]
    fn test_foreign_region_is_rejected() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let forged: TargetRegion = serde_json::from_str(
            r#"{"shape":"Single","anchor":{"row":9,"col":9},"cells":[{"row":9,"col":9}]}"#,
        )
        .unwrap();
        let result = resolver.resolve_attack(Weapon::Classical, &one, &mut two, &forged, &mut rng);
        assert!(matches!(result, Err(FleetError::InvalidRegion(_))));
    }

    #[test]
    fn test_scattered_square_is_rejected_without_mutation() {
        let resolver = WeaponResolver::new(EngineConfig::default());
        let (one, mut two) = boards();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scattered: TargetRegion = serde_json::from_str(
            r#"{"shape":"Square2x2","anchor":{"row":0,"col":0},
                "cells":[{"row":0,"col":0},{"row":3,"col":3},{"row":2,"col":6},{"row":7,"col":7}]}"#,
        )
        .unwrap();

        let result = resolver.resolve_attack(Weapon::Classical, &one, &mut two, &scattered, &mut rng);
        assert!(matches!(result, Err(FleetError::InvalidRegion(_))));
        assert_eq!(two.shots_received(), 0);
        assert_eq!(two.cell(Coordinate::new(2, 6)).unwrap().state, CellState::Occupied);
    }
}
