//! Session state: turn machine, attempt accounting, terminal status.
//!
//! ## GameSession
//!
//! One play-through from setup to a terminal state. Owns the deck and the
//! per-card visual faces; exposes read accessors for the presentation layer.
//! Mutation goes through the engine, which upholds the invariants:
//!
//! - `matches <= pairs`
//! - `attempts_used` increments exactly once per completed two-card turn
//!   and never exceeds `max_attempts`
//! - `Won` iff `matches == pairs`; `Lost` iff the budget is exhausted first
//!
//! ## TurnState
//!
//! At most two selected, unresolved cards. `Resolving` acts as a lock: no
//! input is accepted until the deferred mismatch resolution completes.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardFace, CardId};
use super::deck::Deck;

/// Selection state within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// No card selected; a new turn may start.
    Empty,
    /// One card revealed, awaiting its partner. No attempt charged yet.
    OneSelected(CardId),
    /// Two mismatched cards revealed, awaiting deferred flip-back.
    /// Input is rejected until resolution.
    Resolving {
        /// First card of the turn.
        first: CardId,
        /// Second card of the turn.
        second: CardId,
    },
}

impl TurnState {
    /// Whether new card input is accepted in this state.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        !matches!(self, TurnState::Resolving { .. })
    }
}

/// Session lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Cards remain and attempts are available.
    InProgress,
    /// All pairs matched. Terminal.
    Won,
    /// Attempt budget exhausted before all pairs matched. Terminal.
    Lost,
}

impl SessionStatus {
    /// Whether the session has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }
}

/// One play-through: deck, faces, counters, turn machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    /// Generation tag; stale deferred resolutions are dropped against it.
    generation: u64,
    deck: Deck,
    /// Visual face per deck position.
    faces: Vec<CardFace>,
    turn: TurnState,
    status: SessionStatus,
    attempts_used: u32,
    matches: u32,
    max_attempts: u32,
    pairs: u32,
}

impl GameSession {
    /// Create a fresh session over a built deck.
    #[must_use]
    pub(crate) fn new(generation: u64, deck: Deck, pairs: u32, max_attempts: u32) -> Self {
        let faces = vec![CardFace::Hidden; deck.len()];
        Self {
            generation,
            deck,
            faces,
            turn: TurnState::Empty,
            status: SessionStatus::InProgress,
            attempts_used: 0,
            matches: 0,
            max_attempts,
            pairs,
        }
    }

    // === Read accessors ===

    /// Generation tag of this session.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The shuffled deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current turn selection state.
    #[must_use]
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Attempts charged so far.
    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Attempts remaining in the budget, clamped at zero.
    #[must_use]
    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }

    /// Attempt budget for the session.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Total pairs in the deck.
    #[must_use]
    pub fn pairs(&self) -> u32 {
        self.pairs
    }

    /// Visual face of a card, or `None` for an unknown id.
    #[must_use]
    pub fn face(&self, card_id: CardId) -> Option<CardFace> {
        self.deck.position_of(card_id).map(|pos| self.faces[pos])
    }

    /// Iterate over cards with their faces, in deck order.
    pub fn board(&self) -> impl Iterator<Item = (&Card, CardFace)> {
        self.deck.iter().zip(self.faces.iter().copied())
    }

    // === Engine mutators ===

    pub(crate) fn set_turn(&mut self, turn: TurnState) {
        self.turn = turn;
    }

    pub(crate) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    pub(crate) fn set_face(&mut self, card_id: CardId, face: CardFace) {
        if let Some(pos) = self.deck.position_of(card_id) {
            self.faces[pos] = face;
        }
    }

    /// Charge one attempt for a completed two-card comparison.
    pub(crate) fn charge_attempt(&mut self) {
        debug_assert!(self.attempts_used < self.max_attempts);
        self.attempts_used += 1;
    }

    /// Record a matched pair.
    pub(crate) fn record_match(&mut self) {
        debug_assert!(self.matches < self.pairs);
        self.matches += 1;
    }

    /// Disable every card still hidden (loss cleanup).
    pub(crate) fn disable_remaining(&mut self) {
        for face in &mut self.faces {
            if *face == CardFace::Hidden {
                *face = CardFace::Disabled;
            }
        }
    }
}
