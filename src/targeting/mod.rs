pub mod region;

pub use region::{RegionSelector, RegionShape, TargetRegion};
