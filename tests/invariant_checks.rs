use proptest::prelude::*;
use quantum_fleet::board::{random_fleet, snapshot, Board, CellState};
use quantum_fleet::core::config::EngineConfig;
use quantum_fleet::core::types::{Coordinate, PlayerId};
use quantum_fleet::protection::ProtectionLevel;
use quantum_fleet::targeting::{RegionSelector, RegionShape};
use quantum_fleet::weapons::{Weapon, WeaponResolver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WEAPONS: [Weapon; 3] = [Weapon::Classical, Weapon::Grover, Weapon::EvScan];
const SHAPES: [RegionShape; 4] = [
    RegionShape::Single,
    RegionShape::Square2x2,
    RegionShape::Row,
    RegionShape::Column,
];

fn fleet_board(owner: PlayerId, config: &EngineConfig, rng: &mut ChaCha8Rng) -> Board {
    let layout = random_fleet(&config.fleet, rng).unwrap();
    let mut board = Board::new(owner);
    board.place_fleet(&layout, &config.fleet).unwrap();
    board
}

fn attack_strategy() -> impl Strategy<Value = (usize, usize, u8, u8, bool)> {
    (0..WEAPONS.len(), 0..SHAPES.len(), 0u8..10, 0u8..10, any::<bool>())
}

proptest! {
    /// Attacks never add or remove ship cells, sunk ships stay sunk, and
    /// rejected attacks leave the board untouched.
    #[test]
    fn test_attack_sequences_preserve_board_invariants(
        seed in 0u64..u64::MAX,
        attacks in prop::collection::vec(attack_strategy(), 1..40),
    ) {
        let config = EngineConfig::default();
        let resolver = WeaponResolver::new(config.clone());
        let selector = RegionSelector::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let attacker = fleet_board(PlayerId::One, &config, &mut rng);
        let mut defender = fleet_board(PlayerId::Two, &config, &mut rng);
        let ship_cells = defender.ship_cell_count();

        for (weapon_idx, shape_idx, row, col, shield) in attacks {
            let sunk_before: Vec<bool> = defender.ships().iter().map(|s| s.is_sunk()).collect();
            let hits_before = defender.stats().cells_hit;

            let Ok(region) = selector.resolve(SHAPES[shape_idx], Coordinate::new(row, col)) else {
                continue;
            };
            if shield && Weapon::Zeno.accepts(region.shape) {
                resolver.resolve_defense(&mut defender, region.cells(), ProtectionLevel::Partial).unwrap();
            }

            let before = snapshot(&defender);
            match resolver.resolve_attack(WEAPONS[weapon_idx], &attacker, &mut defender, &region, &mut rng) {
                Ok(result) => {
                    for delta in &result.deltas {
                        prop_assert!(region.contains(delta.coord));
                        prop_assert!(!delta.before.is_resolved());
                    }
                }
                Err(err) => {
                    prop_assert!(!err.is_fatal(), "fatal error: {}", err);
                    prop_assert_eq!(&snapshot(&defender), &before);
                }
            }

            prop_assert_eq!(defender.ship_cell_count(), ship_cells);
            prop_assert!(defender.stats().cells_hit >= hits_before);
            for (ship, was_sunk) in defender.ships().iter().zip(sunk_before) {
                prop_assert!(!was_sunk || ship.is_sunk());
                prop_assert_eq!(ship.is_sunk(), ship.hits() as usize == ship.len());
            }
            prop_assert!(defender.verify().is_ok());
            resolver.turn_boundary(&mut defender);
        }
    }

    /// Random placement always yields a layout the board accepts
    #[test]
    fn test_random_fleet_is_valid(seed in 0u64..u64::MAX) {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = fleet_board(PlayerId::One, &config, &mut rng);
        let occupied = board.cells().filter(|(_, c)| c.state == CellState::Occupied).count();
        prop_assert_eq!(occupied, config.fleet.ship_sizes.iter().map(|&s| s as usize).sum::<usize>());
    }
}
