//! Attack and defense results

use serde::Serialize;

use crate::board::CellDelta;
use crate::core::types::{Coordinate, PlayerId, ShipId};
use crate::protection::ProtectionLevel;
use crate::targeting::TargetRegion;
use crate::weapons::kind::Weapon;

/// Categorical outcome of an attack. Which categories a weapon can produce
/// depends on the weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// Classical / Grover: a ship cell was struck
    Hit,
    /// Classical / Grover: nothing was struck
    Miss,
    /// EV scan: a ship is somewhere in the region, untouched
    Detected,
    /// EV scan: the probe interacted and damaged one ship cell
    Interaction,
    /// EV scan: no usable answer
    Inconclusive,
    /// EV scan: the region holds no ship
    Clear,
}

/// What a weapon case decided, before any board mutation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolution {
    pub outcome: Outcome,
    /// Cells to strike, in order
    pub strikes: Vec<Coordinate>,
    /// Strongest defender protection the attack met
    pub protection: ProtectionLevel,
    /// Sampled success probability, when the weapon samples one
    pub probability: Option<f64>,
    /// Cell the measurement collapsed onto
    pub measured: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackResult {
    pub weapon: Weapon,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub region: TargetRegion,
    /// Cells whose state changed
    pub deltas: Vec<CellDelta>,
    pub outcome: Outcome,
    pub protection: ProtectionLevel,
    pub probability: Option<f64>,
    pub measured: Option<Coordinate>,
}

impl AttackResult {
    /// Ships this attack sank
    pub fn sunk_ships(&self) -> Vec<ShipId> {
        self.deltas
            .iter()
            .filter(|d| d.sunk)
            .filter_map(|d| d.ship)
            .collect()
    }

    /// Cells that went from Occupied to Hit
    pub fn hit_cells(&self) -> Vec<Coordinate> {
        self.deltas
            .iter()
            .filter(|d| d.is_hit())
            .map(|d| d.coord)
            .collect()
    }

    pub fn damaged(&self) -> bool {
        self.deltas.iter().any(|d| d.is_hit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefenseResult {
    pub owner: PlayerId,
    pub cells: Vec<Coordinate>,
    pub level: ProtectionLevel,
    pub rounds: u8,
}
