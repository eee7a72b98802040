//! Per-player turn state machine
//!
//! AwaitingTarget -> TargetSelected -> WeaponFired -> TurnComplete.
//! Target selection can be changed or cleared until a weapon fires; after
//! that the turn only moves forward.

use serde::Serialize;

use crate::core::error::{FleetError, Result};
use crate::core::types::PlayerId;
use crate::targeting::TargetRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnPhase {
    AwaitingTarget,
    TargetSelected,
    WeaponFired,
    TurnComplete,
}

#[derive(Debug, Clone)]
pub struct TurnState {
    player: PlayerId,
    phase: TurnPhase,
    target: Option<TargetRegion>,
}

impl TurnState {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            phase: TurnPhase::AwaitingTarget,
            target: None,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn target(&self) -> Option<&TargetRegion> {
        self.target.as_ref()
    }

    fn ensure_can_act(&self) -> Result<()> {
        match self.phase {
            TurnPhase::WeaponFired | TurnPhase::TurnComplete => Err(FleetError::WeaponUnavailable),
            TurnPhase::AwaitingTarget | TurnPhase::TargetSelected => Ok(()),
        }
    }

    /// Select or replace the target
    pub fn select_target(&mut self, region: TargetRegion) -> Result<()> {
        self.ensure_can_act()?;
        self.target = Some(region);
        self.phase = TurnPhase::TargetSelected;
        Ok(())
    }

    pub fn clear_target(&mut self) -> Result<()> {
        self.ensure_can_act()?;
        self.target = None;
        self.phase = TurnPhase::AwaitingTarget;
        Ok(())
    }

    /// The target a weapon may fire at right now
    pub fn ready_target(&self) -> Result<&TargetRegion> {
        self.ensure_can_act()?;
        self.target.as_ref().ok_or(FleetError::NoTargetSelected)
    }

    pub fn mark_fired(&mut self) -> Result<()> {
        if self.phase != TurnPhase::TargetSelected {
            return Err(FleetError::InvariantViolation(format!(
                "weapon fired from phase {:?}",
                self.phase
            )));
        }
        self.phase = TurnPhase::WeaponFired;
        Ok(())
    }

    pub fn complete(&mut self) {
        self.phase = TurnPhase::TurnComplete;
    }
}
