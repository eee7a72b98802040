pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{FleetError, Result};
pub use types::{Coordinate, PlayerId, ShipId, BOARD_SIZE};
