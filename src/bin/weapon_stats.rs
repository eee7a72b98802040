//! Headless weapon statistics
//!
//! Fires each offensive weapon many times at a fixed 2x2 region, with and
//! without a ship inside it and under every protection level, and prints the
//! observed outcome rates next to the configured ones.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use quantum_fleet::board::Board;
use quantum_fleet::core::config::{EngineConfig, FleetConfig};
use quantum_fleet::core::error::Result;
use quantum_fleet::core::types::{Coordinate, PlayerId};
use quantum_fleet::protection::ProtectionLevel;
use quantum_fleet::targeting::{RegionSelector, RegionShape, TargetRegion};
use quantum_fleet::weapons::{ev_scan, grover, Outcome, Weapon, WeaponResolver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Monte Carlo estimator for weapon outcome rates
#[derive(Parser, Debug)]
#[command(name = "weapon_stats")]
#[command(about = "Estimate weapon outcome rates by repeated seeded trials")]
struct Args {
    /// Trials per scenario
    #[arg(long, default_value_t = 10_000)]
    trials: u64,

    /// Base seed; trial i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config TOML (defaults built in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Debug, Clone, Copy)]
struct Scenario {
    weapon: Weapon,
    protection: ProtectionLevel,
    ship_present: bool,
}

#[derive(Serialize)]
struct ScenarioStats {
    weapon: Weapon,
    protection: ProtectionLevel,
    ship_present: bool,
    expected: BTreeMap<String, f64>,
    observed: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct StatsReport {
    seed: u64,
    trials: u64,
    scenarios: Vec<ScenarioStats>,
}

const SHIP: Coordinate = Coordinate::new(3, 3);
const DECOY: Coordinate = Coordinate::new(7, 7);
const ANCHOR: Coordinate = Coordinate::new(2, 2);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quantum_fleet=warn")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.fleet = FleetConfig {
        ship_sizes: vec![1],
    };
    let resolver = WeaponResolver::new(config);
    let region = RegionSelector::from_config(&resolver.config().region)
        .resolve(RegionShape::Square2x2, ANCHOR)?;

    let mut scenarios = Vec::new();
    for weapon in Weapon::ALL.into_iter().filter(Weapon::is_offensive) {
        for protection in [ProtectionLevel::None, ProtectionLevel::Partial, ProtectionLevel::Maximum] {
            for ship_present in [true, false] {
                scenarios.push(Scenario {
                    weapon,
                    protection,
                    ship_present,
                });
            }
        }
    }

    let stats = scenarios
        .iter()
        .map(|scenario| run_scenario(&resolver, &region, *scenario, args.trials, seed))
        .collect::<Result<Vec<_>>>()?;

    let report = StatsReport {
        seed,
        trials: args.trials,
        scenarios: stats,
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        _ => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_scenario(
    resolver: &WeaponResolver,
    region: &TargetRegion,
    scenario: Scenario,
    trials: u64,
    seed: u64,
) -> Result<ScenarioStats> {
    let outcomes = (0..trials)
        .into_par_iter()
        .map(|i| run_trial(resolver, region, scenario, seed.wrapping_add(i)))
        .collect::<Result<Vec<Outcome>>>()?;

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for outcome in &outcomes {
        *counts.entry(format!("{:?}", outcome)).or_default() += 1;
    }
    let observed = counts
        .into_iter()
        .map(|(name, count)| (name, rate(count, trials)))
        .collect();

    Ok(ScenarioStats {
        weapon: scenario.weapon,
        protection: scenario.protection,
        ship_present: scenario.ship_present,
        expected: expected_rates(resolver.config(), scenario),
        observed,
    })
}

fn run_trial(
    resolver: &WeaponResolver,
    region: &TargetRegion,
    scenario: Scenario,
    seed: u64,
) -> Result<Outcome> {
    let fleet = &resolver.config().fleet;
    let attacker = {
        let mut board = Board::new(PlayerId::One);
        board.place_fleet(&[vec![DECOY]], fleet)?;
        board
    };
    let mut defender = Board::new(PlayerId::Two);
    let ship = if scenario.ship_present { SHIP } else { DECOY };
    defender.place_fleet(&[vec![ship]], fleet)?;
    if scenario.protection.is_active() {
        resolver.resolve_defense(&mut defender, region.cells(), scenario.protection)?;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let result = resolver.resolve_attack(scenario.weapon, &attacker, &mut defender, region, &mut rng)?;
    Ok(result.outcome)
}

fn expected_rates(config: &EngineConfig, scenario: Scenario) -> BTreeMap<String, f64> {
    let present = scenario.ship_present;
    let weights = match scenario.weapon {
        Weapon::Classical => {
            let p = if present { 1.0 } else { 0.0 };
            vec![(Outcome::Hit, p), (Outcome::Miss, 1.0 - p)]
        }
        Weapon::Grover => {
            let reduction = scenario.protection.factor(&config.protection);
            let p = grover::hit_probability(present, config.grover.base_hit_probability, reduction);
            vec![(Outcome::Hit, p), (Outcome::Miss, 1.0 - p)]
        }
        Weapon::EvScan => ev_scan::distribution(present, scenario.protection.is_active(), &config.ev_scan),
        Weapon::Zeno => Vec::new(),
    };
    weights
        .into_iter()
        .filter(|(_, p)| *p > 0.0)
        .map(|(outcome, p)| (format!("{:?}", outcome), p))
        .collect()
}

fn rate(count: u64, trials: u64) -> f64 {
    if trials == 0 {
        0.0
    } else {
        count as f64 / trials as f64
    }
}

fn print_text(report: &StatsReport) {
    println!("Weapon Statistics (seed {}, {} trials each)", report.seed, report.trials);
    println!("==========================================");
    for stats in &report.scenarios {
        println!(
            "{} vs {} protection, ship {}",
            stats.weapon,
            stats.protection.label(),
            if stats.ship_present { "present" } else { "absent" }
        );
        for (outcome, observed) in &stats.observed {
            let expected = stats.expected.get(outcome).copied().unwrap_or(0.0);
            println!("  {:<13} observed {:>6.3}  expected {:>6.3}", outcome, observed, expected);
        }
    }
}
