//! Weapon resolution engine
//!
//! Each weapon is a variant of [`Weapon`] with one resolution function:
//! - Classical: deterministic strike
//! - Grover: amplitude amplification, 85% against an unprotected ship
//! - EV scan: interaction-free measurement with four categorical outcomes
//! - Zeno: one-round protection of the owner's cells

mod classical;
pub mod ev_scan;
pub mod grover;
pub mod kind;
pub mod resolver;
pub mod result;
pub mod zeno;

pub use kind::Weapon;
pub use resolver::WeaponResolver;
pub use result::{AttackResult, DefenseResult, Outcome};
pub use zeno::DefenseRequest;
