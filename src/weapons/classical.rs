//! Classical shot: no sampling, every unresolved cell in the region is struck

use crate::board::Board;
use crate::protection::ProtectionLevel;
use crate::targeting::TargetRegion;
use crate::weapons::result::{Outcome, Resolution};

pub(crate) fn resolve(defender: &Board, region: &TargetRegion) -> Resolution {
    let strikes = defender.unresolved_in(region.cells());
    let outcome = if defender.occupied_in(region.cells()).is_empty() {
        Outcome::Miss
    } else {
        Outcome::Hit
    };

    Resolution {
        outcome,
        strikes,
        // Shells do not care about Zeno freezing
        protection: ProtectionLevel::None,
        probability: None,
        measured: None,
    }
}
