//! Quantum Fleet - turn-based naval strategy with quantum-inspired weapons
//!
//! Two players each hide a fleet on an 8x8 board and take turns firing one
//! weapon per turn. Classical shots are deterministic; Grover shots, EV scans
//! and Zeno defenses are probabilistic and driven by a seeded RNG owned by
//! the [`session::Session`].

pub mod board;
pub mod core;
pub mod protection;
pub mod report;
pub mod session;
pub mod targeting;
pub mod weapons;
