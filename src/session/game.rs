//! Game session - both boards, the resolver and the turn index in one place
//!
//! The session owns the only RNG in a game. Given the same seed, layouts and
//! command sequence it reproduces every outcome exactly.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::{random_fleet, snapshot, Board, BoardView};
use crate::core::config::EngineConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::{Coordinate, PlayerId};
use crate::session::turn::{TurnPhase, TurnState};
use crate::targeting::{RegionSelector, RegionShape, TargetRegion};
use crate::weapons::{AttackResult, DefenseRequest, DefenseResult, Weapon, WeaponResolver};

/// Serializable view of a whole session from one player's seat
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub viewer: PlayerId,
    pub round: u32,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    pub winner: Option<PlayerId>,
    pub own: BoardView,
    pub opponent: BoardView,
}

pub struct Session {
    resolver: WeaponResolver,
    selector: RegionSelector,
    boards: [Board; 2],
    turn: TurnState,
    turn_index: u32,
    rng: ChaCha8Rng,
    winner: Option<PlayerId>,
    poisoned: Option<String>,
}

impl Session {
    /// Create a session with empty boards; fleets are placed afterwards
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let selector = RegionSelector::from_config(&config.region);
        Ok(Self {
            resolver: WeaponResolver::new(config),
            selector,
            boards: [Board::new(PlayerId::One), Board::new(PlayerId::Two)],
            turn: TurnState::new(PlayerId::One),
            turn_index: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            winner: None,
            poisoned: None,
        })
    }

    /// Create a session with both fleets placed at random
    pub fn with_random_fleets(config: EngineConfig, seed: u64) -> Result<Self> {
        let mut session = Self::new(config, seed)?;
        session.auto_place(PlayerId::One)?;
        session.auto_place(PlayerId::Two)?;
        Ok(session)
    }

    pub fn config(&self) -> &EngineConfig {
        self.resolver.config()
    }

    pub fn resolver(&self) -> &WeaponResolver {
        &self.resolver
    }

    pub fn place_fleet(&mut self, player: PlayerId, layout: &[Vec<Coordinate>]) -> Result<()> {
        self.guard()?;
        let fleet = self.resolver.config().fleet.clone();
        self.boards[player.index()].place_fleet(layout, &fleet)
    }

    pub fn auto_place(&mut self, player: PlayerId) -> Result<()> {
        self.guard()?;
        let fleet = self.resolver.config().fleet.clone();
        let layout = random_fleet(&fleet, &mut self.rng)?;
        self.boards[player.index()].place_fleet(&layout, &fleet)
    }

    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn.player()
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn target(&self) -> Option<&TargetRegion> {
        self.turn.target()
    }

    /// Zero-based count of completed turns
    pub fn turn_index(&self) -> u32 {
        self.turn_index
    }

    /// One-based round; a round is one turn for each player
    pub fn round(&self) -> u32 {
        self.turn_index / 2 + 1
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn poisoned(&self) -> Option<&str> {
        self.poisoned.as_deref()
    }

    /// Resolve and select a target region for the current turn
    pub fn select_target(&mut self, shape: RegionShape, anchor: Coordinate) -> Result<&TargetRegion> {
        self.ready()?;
        let region = self.selector.resolve(shape, anchor)?;
        self.turn.select_target(region)?;
        self.turn.ready_target()
    }

    /// Select a region built elsewhere; it is validated again before use
    pub fn select_region(&mut self, region: TargetRegion) -> Result<()> {
        self.ready()?;
        region.validate()?;
        self.turn.select_target(region)
    }

    pub fn clear_target(&mut self) -> Result<()> {
        self.ready()?;
        self.turn.clear_target()
    }

    /// Fire an offensive weapon at the opponent over the selected region
    ///
    /// Recoverable errors leave the turn where it was so the player can pick
    /// another target or weapon.
    pub fn fire(&mut self, weapon: Weapon) -> Result<AttackResult> {
        self.ready()?;
        let region = self.turn.ready_target()?.clone();

        let [one, two] = &mut self.boards;
        let (attacker, defender) = match self.turn.player() {
            PlayerId::One => (&*one, two),
            PlayerId::Two => (&*two, one),
        };
        let outcome = self
            .resolver
            .resolve_attack(weapon, attacker, defender, &region, &mut self.rng);
        let result = self.track(outcome)?;
        let fired = self.turn.mark_fired();
        self.track(fired)?;

        if self.boards[result.defender.index()].all_sunk() {
            tracing::info!(winner = %result.attacker, round = self.round(), "fleet destroyed");
            self.winner = Some(result.attacker);
        }
        Ok(result)
    }

    /// Raise Zeno protection over the selected region of the player's own board
    pub fn defend(&mut self, request: DefenseRequest) -> Result<DefenseResult> {
        self.ready()?;
        let region = self.turn.ready_target()?.clone();
        Weapon::Zeno.ensure_accepts(&region)?;

        let level = request.resolve_level(&mut self.rng, &self.resolver.config().protection);
        let board = &mut self.boards[self.turn.player().index()];
        let outcome = self.resolver.resolve_defense(board, region.cells(), level);
        let result = self.track(outcome)?;
        let fired = self.turn.mark_fired();
        self.track(fired)?;

        tracing::debug!(
            owner = %result.owner,
            level = result.level.label(),
            cells = result.cells.len(),
            "zeno defense raised"
        );
        Ok(result)
    }

    /// Finish the current turn and hand over to the opponent
    ///
    /// Protection on the incoming player's board decays here, at the start of
    /// its owner's turn. Returns the cells whose protection expired.
    pub fn end_turn(&mut self) -> Result<Vec<Coordinate>> {
        self.ready()?;
        self.turn.complete();
        let next = self.turn.player().opponent();
        self.turn_index += 1;
        self.turn = TurnState::new(next);

        Ok(self.resolver.turn_boundary(&mut self.boards[next.index()]))
    }

    /// Full view of a player's own board
    pub fn snapshot(&self, player: PlayerId) -> BoardView {
        snapshot(self.board(player))
    }

    /// What a player may see of the session
    pub fn view(&self, viewer: PlayerId) -> SessionView {
        SessionView {
            viewer,
            round: self.round(),
            current_player: self.current_player(),
            phase: self.phase(),
            winner: self.winner,
            own: self.snapshot(viewer),
            opponent: self.snapshot(viewer.opponent()).concealed(),
        }
    }

    fn guard(&self) -> Result<()> {
        match &self.poisoned {
            Some(reason) => Err(FleetError::InvariantViolation(reason.clone())),
            None => Ok(()),
        }
    }

    /// Gate for turn actions: healthy session, fleets placed, no winner yet
    fn ready(&self) -> Result<()> {
        self.guard()?;
        if self.winner.is_some() {
            return Err(FleetError::GameOver);
        }
        if let Some(board) = self.boards.iter().find(|b| !b.is_placed()) {
            return Err(FleetError::InvalidPlacement(format!(
                "{} has not placed a fleet",
                board.owner()
            )));
        }
        Ok(())
    }

    /// Poison the session on fatal errors so no further actions run
    fn track<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if let Err(err) = &outcome {
            if err.is_fatal() {
                tracing::error!(error = %err, "session halted");
                self.poisoned = Some(err.to_string());
            }
        }
        outcome
    }
}
