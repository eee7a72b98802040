//! Zeno protection levels and per-cell entries

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ProtectionConfig;

/// Strength tier of a Zeno defense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectionLevel {
    None,
    Partial,
    Maximum,
}

impl ProtectionLevel {
    /// Fraction of attack probability this level removes
    pub fn factor(&self, config: &ProtectionConfig) -> f64 {
        match self {
            ProtectionLevel::None => 0.0,
            ProtectionLevel::Partial => config.partial_factor,
            ProtectionLevel::Maximum => config.maximum_factor,
        }
    }

    /// Collapse a Zeno measurement into a concrete level
    ///
    /// Repeated weak measurements freeze the qubit in |0> (Maximum) with the
    /// configured probability, otherwise it leaks into Partial protection.
    pub fn sample(rng: &mut impl Rng, config: &ProtectionConfig) -> ProtectionLevel {
        if rng.gen_bool(config.maximum_level_probability) {
            ProtectionLevel::Maximum
        } else {
            ProtectionLevel::Partial
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ProtectionLevel::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProtectionLevel::None => "none",
            ProtectionLevel::Partial => "partial",
            ProtectionLevel::Maximum => "maximum",
        }
    }
}

/// Active protection on one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionEntry {
    pub level: ProtectionLevel,
    pub rounds_remaining: u8,
}
