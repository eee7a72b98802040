//! Engine configuration with documented constants
//!
//! Every probability the weapon resolver uses lives here. The headline values
//! (85% Grover hit rate, 90%/60% Zeno protection) are fixed by the game rules;
//! the EV scan branch weights are tuning placeholders and are expected to move.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{FleetError, Result};
use crate::core::types::{BOARD_CELLS, BOARD_SIZE};

/// Tolerance used when checking that a probability branch sums to one
const SUM_TOLERANCE: f64 = 1e-6;

/// Grover shot tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroverConfig {
    /// Hit probability against an unprotected region containing a ship
    ///
    /// Amplitude amplification concentrates probability on marked cells but
    /// the game deliberately stops short of the optimal iteration count.
    pub base_hit_probability: f64,
}

impl Default for GroverConfig {
    fn default() -> Self {
        Self {
            base_hit_probability: 0.85,
        }
    }
}

/// Elitzur-Vaidman scan tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvScanConfig {
    /// Ship present: interaction-free detection
    pub detected: f64,
    /// Ship present: the probe interacted and damaged one ship cell
    pub interaction: f64,
    /// Ship present: interference gave no usable answer
    pub present_inconclusive: f64,
    /// No ship: perfect interference reports the region clear
    pub clear: f64,
    /// No ship: noise that could be mistaken for a signal
    pub absent_inconclusive: f64,
    /// Probability mass moved from the confident outcome to Inconclusive
    /// when any scanned cell is under Zeno protection
    pub obfuscation_shift: f64,
}

impl Default for EvScanConfig {
    fn default() -> Self {
        Self {
            detected: 0.80,
            interaction: 0.15,
            present_inconclusive: 0.05,
            clear: 0.95,
            absent_inconclusive: 0.05,
            obfuscation_shift: 0.05,
        }
    }
}

/// Zeno defense tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Fraction of attack probability removed by Partial protection
    pub partial_factor: f64,
    /// Fraction of attack probability removed by Maximum protection
    pub maximum_factor: f64,
    /// Owner turn boundaries an entry survives before it is cleared
    pub duration_rounds: u8,
    /// Chance that a quantum-sampled defense collapses to Maximum
    ///
    /// A single qubit prepared with H and rotated by a net Ry(0.3) measures
    /// |0> with probability cos²((π/2 + 0.3) / 2), roughly 0.35.
    pub maximum_level_probability: f64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            partial_factor: 0.60,
            maximum_factor: 0.90,
            duration_rounds: 1,
            maximum_level_probability: 0.35,
        }
    }
}

/// How a 2x2 square anchored near the board edge is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareEdgePolicy {
    /// Shift the anchor inward so the square always covers four cells
    #[default]
    Clamp,
    /// Keep the anchor and drop the cells that fall off the board
    Clip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub square_edge: SquareEdgePolicy,
}

/// Ship manifest each player must place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Length of every ship in the fleet
    pub ship_sizes: Vec<u8>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ship_sizes: vec![1; 8],
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grover: GroverConfig,
    pub ev_scan: EvScanConfig,
    pub protection: ProtectionConfig,
    pub region: RegionConfig,
    pub fleet: FleetConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        check_probability("grover.base_hit_probability", self.grover.base_hit_probability)?;

        let ev = &self.ev_scan;
        for (name, value) in [
            ("ev_scan.detected", ev.detected),
            ("ev_scan.interaction", ev.interaction),
            ("ev_scan.present_inconclusive", ev.present_inconclusive),
            ("ev_scan.clear", ev.clear),
            ("ev_scan.absent_inconclusive", ev.absent_inconclusive),
            ("ev_scan.obfuscation_shift", ev.obfuscation_shift),
        ] {
            check_probability(name, value)?;
        }
        check_branch_sum(
            "ev_scan present branch",
            ev.detected + ev.interaction + ev.present_inconclusive,
        )?;
        check_branch_sum("ev_scan absent branch", ev.clear + ev.absent_inconclusive)?;
        if ev.obfuscation_shift > ev.detected || ev.obfuscation_shift > ev.clear {
            return Err(FleetError::InvalidConfig(format!(
                "ev_scan.obfuscation_shift ({}) exceeds a confident outcome weight",
                ev.obfuscation_shift
            )));
        }

        let protection = &self.protection;
        check_probability("protection.partial_factor", protection.partial_factor)?;
        check_probability("protection.maximum_factor", protection.maximum_factor)?;
        check_probability(
            "protection.maximum_level_probability",
            protection.maximum_level_probability,
        )?;
        if protection.partial_factor > protection.maximum_factor {
            return Err(FleetError::InvalidConfig(format!(
                "protection.partial_factor ({}) should be <= maximum_factor ({})",
                protection.partial_factor, protection.maximum_factor
            )));
        }
        if protection.duration_rounds == 0 {
            return Err(FleetError::InvalidConfig(
                "protection.duration_rounds must be at least 1".into(),
            ));
        }

        let sizes = &self.fleet.ship_sizes;
        if sizes.is_empty() {
            return Err(FleetError::InvalidConfig("fleet.ship_sizes is empty".into()));
        }
        if let Some(size) = sizes.iter().find(|&&s| s == 0 || s > BOARD_SIZE) {
            return Err(FleetError::InvalidConfig(format!(
                "fleet.ship_sizes contains unplaceable length {}",
                size
            )));
        }
        let total: usize = sizes.iter().map(|&s| s as usize).sum();
        if total > BOARD_CELLS {
            return Err(FleetError::InvalidConfig(format!(
                "fleet needs {} cells but the board has {}",
                total, BOARD_CELLS
            )));
        }

        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(FleetError::InvalidConfig(format!(
            "{} ({}) must be within [0, 1]",
            name, value
        )));
    }
    Ok(())
}

fn check_branch_sum(name: &str, sum: f64) -> Result<()> {
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(FleetError::InvalidConfig(format!(
            "{} sums to {}, expected 1.0",
            name, sum
        )));
    }
    Ok(())
}
