//! Grover shot - amplitude amplification over the target region
//!
//! Amplification only boosts states the oracle marks, so a region without an
//! un-hit ship cell can never produce a hit. Zeno protection anywhere in the
//! region damps the oracle; the strongest level present applies.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::core::config::GroverConfig;
use crate::protection::ProtectionTracker;
use crate::targeting::TargetRegion;
use crate::weapons::result::{Outcome, Resolution};

/// Effective hit probability after protection
pub fn hit_probability(present: bool, base: f64, reduction: f64) -> f64 {
    if !present {
        return 0.0;
    }
    (base * (1.0 - reduction)).clamp(0.0, 1.0)
}

pub(crate) fn resolve(
    defender: &Board,
    region: &TargetRegion,
    tracker: &ProtectionTracker,
    config: &GroverConfig,
    rng: &mut impl Rng,
) -> Resolution {
    let occupied = defender.occupied_in(region.cells());
    let protection = tracker.strongest_in(defender, region.cells());
    let probability = hit_probability(
        !occupied.is_empty(),
        config.base_hit_probability,
        tracker.reduction_in(defender, region.cells()),
    );

    let amplified = !occupied.is_empty() && rng.gen_bool(probability);
    tracing::debug!(
        p_eff = probability,
        protection = protection.label(),
        amplified,
        "grover draw"
    );

    if amplified {
        if let Some(&target) = occupied.choose(rng) {
            return Resolution {
                outcome: Outcome::Hit,
                strikes: vec![target],
                protection,
                probability: Some(probability),
                measured: Some(target),
            };
        }
    }

    // The measurement still collapses somewhere; it just found open water
    let measured = defender.unresolved_in(region.cells()).choose(rng).copied();
    Resolution {
        outcome: Outcome::Miss,
        strikes: Vec::new(),
        protection,
        probability: Some(probability),
        measured,
    }
}
