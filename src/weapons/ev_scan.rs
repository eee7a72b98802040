//! EV scan - Elitzur-Vaidman interaction-free measurement
//!
//! The probe usually reports presence without touching anything. Sometimes
//! the photon takes the live path and damages a ship cell. Zeno protection
//! obfuscates the interference pattern, moving probability from the confident
//! answer into Inconclusive.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::core::config::EvScanConfig;
use crate::protection::ProtectionTracker;
use crate::targeting::TargetRegion;
use crate::weapons::result::{Outcome, Resolution};

/// Outcome weights for a scan, summing to one
pub fn distribution(present: bool, protected: bool, config: &EvScanConfig) -> Vec<(Outcome, f64)> {
    let shift = if protected { config.obfuscation_shift } else { 0.0 };
    if present {
        vec![
            (Outcome::Detected, config.detected - shift),
            (Outcome::Interaction, config.interaction),
            (Outcome::Inconclusive, config.present_inconclusive + shift),
        ]
    } else {
        vec![
            (Outcome::Clear, config.clear - shift),
            (Outcome::Inconclusive, config.absent_inconclusive + shift),
        ]
    }
}

/// Pick an outcome from cumulative weights with a single uniform draw
fn sample(weights: &[(Outcome, f64)], rng: &mut impl Rng) -> Outcome {
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for &(outcome, weight) in weights {
        cumulative += weight;
        if draw < cumulative {
            return outcome;
        }
    }
    // Rounding can leave the cumulative sum a hair under 1.0
    weights
        .last()
        .map(|&(outcome, _)| outcome)
        .unwrap_or(Outcome::Inconclusive)
}

pub(crate) fn resolve(
    defender: &Board,
    region: &TargetRegion,
    tracker: &ProtectionTracker,
    config: &EvScanConfig,
    rng: &mut impl Rng,
) -> Resolution {
    let occupied = defender.occupied_in(region.cells());
    let protection = tracker.strongest_in(defender, region.cells());
    let weights = distribution(!occupied.is_empty(), protection.is_active(), config);
    let mut outcome = sample(&weights, rng);

    tracing::debug!(
        present = !occupied.is_empty(),
        protection = protection.label(),
        ?outcome,
        "ev scan draw"
    );

    let mut strikes = Vec::new();
    let mut measured = None;
    if outcome == Outcome::Interaction {
        match occupied.choose(rng) {
            Some(&cell) => {
                strikes.push(cell);
                measured = Some(cell);
            }
            None => outcome = Outcome::Inconclusive,
        }
    }

    let probability = weights
        .iter()
        .find(|(o, _)| *o == outcome)
        .map(|&(_, weight)| weight);

    Resolution {
        outcome,
        strikes,
        protection,
        probability,
        measured,
    }
}
