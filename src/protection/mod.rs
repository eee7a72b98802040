pub mod level;
pub mod tracker;

pub use level::{ProtectionEntry, ProtectionLevel};
pub use tracker::ProtectionTracker;
