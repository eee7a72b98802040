use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("No target selected")]
    NoTargetSelected,

    #[error("Weapon unavailable: an action was already taken this turn")]
    WeaponUnavailable,

    #[error("Every cell in the region has already been targeted")]
    AlreadyTargeted,

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Game over: no further actions are accepted")]
    GameOver,

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FleetError {
    /// Fatal errors mean the board state can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, FleetError::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invariant_violation_is_fatal() {
        assert!(FleetError::InvariantViolation("ship cells diverged".into()).is_fatal());
        assert!(!FleetError::NoTargetSelected.is_fatal());
        assert!(!FleetError::InvalidRegion("out of bounds".into()).is_fatal());
        assert!(!FleetError::WeaponUnavailable.is_fatal());
    }
}
