//! Zeno defense - freeze the owner's own cells for one opposing attack

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::config::ProtectionConfig;
use crate::core::error::{FleetError, Result};
use crate::protection::ProtectionLevel;

/// Level requested by the defending player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseRequest {
    Level(ProtectionLevel),
    /// Let the Zeno measurement decide between Partial and Maximum
    Auto,
}

impl DefenseRequest {
    pub fn resolve_level(&self, rng: &mut impl Rng, config: &ProtectionConfig) -> ProtectionLevel {
        match self {
            DefenseRequest::Level(level) => *level,
            DefenseRequest::Auto => ProtectionLevel::sample(rng, config),
        }
    }
}

impl FromStr for DefenseRequest {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "partial" => Ok(DefenseRequest::Level(ProtectionLevel::Partial)),
            "maximum" | "max" => Ok(DefenseRequest::Level(ProtectionLevel::Maximum)),
            "auto" | "quantum" => Ok(DefenseRequest::Auto),
            other => Err(FleetError::InvalidRegion(format!(
                "unknown protection level '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_explicit_level_passes_through() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let request = DefenseRequest::Level(ProtectionLevel::Partial);
        assert_eq!(
            request.resolve_level(&mut rng, &ProtectionConfig::default()),
            ProtectionLevel::Partial
        );
    }

    #[test]
    fn test_auto_yields_active_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let level = DefenseRequest::Auto.resolve_level(&mut rng, &ProtectionConfig::default());
        assert!(level.is_active());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "max".parse::<DefenseRequest>().unwrap(),
            DefenseRequest::Level(ProtectionLevel::Maximum)
        );
        assert_eq!("auto".parse::<DefenseRequest>().unwrap(), DefenseRequest::Auto);
        assert!("total".parse::<DefenseRequest>().is_err());
    }
}
