pub mod cell;
pub mod model;
pub mod placement;
pub mod ship;
pub mod view;

pub use cell::{Cell, CellDelta, CellState};
pub use model::{Board, BoardStats};
pub use placement::{random_fleet, validate_layout, Orientation};
pub use ship::{Ship, ShipStatus};
pub use view::{snapshot, BoardView, CellView, ShipView};
