//! Two-player session: boards, turn order and the seeded RNG

pub mod game;
pub mod turn;

pub use game::{Session, SessionView};
pub use turn::{TurnPhase, TurnState};
