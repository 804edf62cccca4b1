//! Match engine: deck setup, flip resolution, win/loss determination.
//!
//! ## Flip state machine
//!
//! ```text
//! Empty --flip--> OneSelected --flip--> [compare, charge 1 attempt]
//!                                          |               |
//!                                        match          mismatch
//!                                          |               |
//!                                        Empty         Resolving --resolve--> Empty
//! ```
//!
//! The first card of a turn is free; an attempt is charged exactly once per
//! completed two-card comparison. `Resolving` rejects all input until the
//! deferred flip-back runs, mirroring a lock against a third flip
//! mid-comparison.
//!
//! ## Deferred resolution
//!
//! The engine never sleeps. A mismatch returns a [`ResolutionTicket`]; the
//! presentation layer waits [`RESOLVE_DELAY`] and calls
//! [`MatchEngine::resolve_mismatch`]. Tickets carry the session generation:
//! a ticket issued before a new `setup_game` resolves to
//! [`ResolveOutcome::Stale`] and touches nothing.
//!
//! ## Stats wiring
//!
//! The injected [`StatsStore`] is hit twice per session at most: `played`
//! increments on setup, `best` folds in the final score on a win.

use std::time::Duration;

use crate::core::{
    CardFace, CardId, ConfigError, Deck, GameRng, GameSession, LevelConfig, SessionStatus,
    TurnState,
};
use crate::stats::{Stats, StatsStore};

/// Display interval before mismatched cards flip back.
///
/// The presentation layer owns the actual timer; this constant keeps hosts
/// agreeing on the interval.
pub const RESOLVE_DELAY: Duration = Duration::from_millis(800);

/// Outcome of a flip input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum TurnResult {
    /// First card of a turn revealed; awaiting its partner.
    Pending,
    /// Input rejected: unknown, disabled, or already-revealed card, board
    /// locked mid-resolution, or session over.
    Ignored,
    /// Second card revealed and it matched.
    Matched {
        /// Pairs matched so far.
        matches: u32,
        /// Whether this match completed the session. When true, the final
        /// score has already been folded into the stats store.
        won: bool,
    },
    /// Second card revealed and it did not match. Wait [`RESOLVE_DELAY`],
    /// then pass the ticket to [`MatchEngine::resolve_mismatch`].
    Mismatched {
        /// Handle for the deferred flip-back.
        ticket: ResolutionTicket,
    },
}

/// Handle for a pending mismatch resolution.
///
/// Tagged with the session generation so a callback that outlives its
/// session is dropped instead of corrupting the replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionTicket {
    generation: u64,
    first: CardId,
    second: CardId,
}

impl ResolutionTicket {
    /// First card of the mismatched turn.
    #[must_use]
    pub fn first(&self) -> CardId {
        self.first
    }

    /// Second card of the mismatched turn.
    #[must_use]
    pub fn second(&self) -> CardId {
        self.second
    }
}

/// Outcome of a deferred mismatch resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum ResolveOutcome {
    /// Cards flipped back; play continues.
    Continue,
    /// Cards flipped back and the attempt budget is exhausted; session is
    /// terminal and remaining cards are disabled.
    Lost {
        /// Attempts charged over the session.
        attempts_used: u32,
    },
    /// Ticket belongs to a replaced session; nothing happened.
    Stale,
}

/// The match engine. Owns the current session and the stats store.
///
/// ## Example
///
/// ```
/// use memory_match::core::{fallback_config, Level};
/// use memory_match::engine::{MatchEngine, TurnResult};
/// use memory_match::stats::MemoryStatsStore;
///
/// let mut engine = MatchEngine::with_seed(MemoryStatsStore::new(), 42);
/// let config = fallback_config(Level::Easy);
/// engine.setup_game(&config).unwrap();
///
/// let first = engine.session().unwrap().deck().get(0).unwrap().card_id;
/// assert_eq!(engine.flip(first), TurnResult::Pending);
/// ```
#[derive(Debug)]
pub struct MatchEngine<S: StatsStore> {
    stats: S,
    rng: GameRng,
    generation: u64,
    session: Option<GameSession>,
}

impl<S: StatsStore> MatchEngine<S> {
    /// Create an engine with an entropy-seeded shuffle.
    #[must_use]
    pub fn new(stats: S) -> Self {
        Self::with_rng(stats, GameRng::from_entropy())
    }

    /// Create an engine with a fixed shuffle seed, for replays and tests.
    #[must_use]
    pub fn with_seed(stats: S, seed: u64) -> Self {
        Self::with_rng(stats, GameRng::new(seed))
    }

    fn with_rng(stats: S, rng: GameRng) -> Self {
        Self {
            stats,
            rng,
            generation: 0,
            session: None,
        }
    }

    /// Start a new session from a level configuration.
    ///
    /// Builds a fresh shuffled deck and resets all counters. Any in-flight
    /// session is discarded; its pending resolution tickets go stale.
    /// Increments the persisted `played` counter.
    ///
    /// Fails with [`ConfigError`] on an invalid configuration; in that case
    /// the previous session (if any) stays in place untouched.
    pub fn setup_game(&mut self, config: &LevelConfig) -> Result<&GameSession, ConfigError> {
        let deck = Deck::build(config, &mut self.rng)?;

        self.generation += 1;
        let session = GameSession::new(self.generation, deck, config.pairs, config.max_attempts);
        tracing::info!(
            level = %config.level,
            pairs = config.pairs,
            max_attempts = config.max_attempts,
            generation = self.generation,
            "session started"
        );

        let played = self.stats.read();
        self.stats.write(&Stats {
            played: played.played + 1,
            ..played
        });

        Ok(&*self.session.insert(session))
    }

    /// The current session, if one has been set up.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Current persisted stats.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats.read()
    }

    /// Delete persisted stats.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Select a card.
    ///
    /// No-ops (returning [`TurnResult::Ignored`]) on: no session, terminal
    /// session, board locked in `Resolving`, exhausted attempt budget, or a
    /// card that is unknown, disabled, or already revealed (including
    /// re-selecting the unresolved first card of the turn).
    pub fn flip(&mut self, card_id: CardId) -> TurnResult {
        let Some(session) = self.session.as_mut() else {
            return TurnResult::Ignored;
        };

        if session.status().is_terminal()
            || !session.turn().accepts_input()
            || session.attempts_used() >= session.max_attempts()
        {
            return TurnResult::Ignored;
        }
        if session.face(card_id) != Some(CardFace::Hidden) {
            return TurnResult::Ignored;
        }

        match session.turn() {
            TurnState::Empty => {
                session.set_face(card_id, CardFace::Revealed);
                session.set_turn(TurnState::OneSelected(card_id));
                TurnResult::Pending
            }
            TurnState::OneSelected(first) => {
                session.set_face(card_id, CardFace::Revealed);
                session.charge_attempt();

                let is_match = match (session.deck().card(first), session.deck().card(card_id)) {
                    (Some(a), Some(b)) => a.matches(b),
                    _ => false,
                };

                if is_match {
                    session.record_match();
                    session.set_face(first, CardFace::Disabled);
                    session.set_face(card_id, CardFace::Disabled);
                    session.set_turn(TurnState::Empty);

                    let matches = session.matches();
                    let won = matches == session.pairs();
                    if won {
                        session.set_status(SessionStatus::Won);
                        let score = session.attempts_used();
                        tracing::info!(score, "session won");

                        let stats = self.stats.read().with_win(score);
                        self.stats.write(&stats);
                    }
                    TurnResult::Matched { matches, won }
                } else {
                    session.set_turn(TurnState::Resolving {
                        first,
                        second: card_id,
                    });
                    TurnResult::Mismatched {
                        ticket: ResolutionTicket {
                            generation: session.generation(),
                            first,
                            second: card_id,
                        },
                    }
                }
            }
            // Guarded by accepts_input above.
            TurnState::Resolving { .. } => TurnResult::Ignored,
        }
    }

    /// Complete a deferred mismatch resolution.
    ///
    /// Flips both cards back to hidden and unlocks the board. Declares the
    /// loss here, not at the flip, if the attempt budget is now exhausted:
    /// game-over is only decided once the display delay has passed.
    ///
    /// A ticket from a replaced session returns [`ResolveOutcome::Stale`]
    /// without touching the current one.
    pub fn resolve_mismatch(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        let Some(session) = self.session.as_mut() else {
            return ResolveOutcome::Stale;
        };
        if ticket.generation != session.generation() {
            tracing::debug!(
                ticket_generation = ticket.generation,
                session_generation = session.generation(),
                "dropping stale resolution ticket"
            );
            return ResolveOutcome::Stale;
        }
        let TurnState::Resolving { first, second } = session.turn() else {
            return ResolveOutcome::Stale;
        };

        session.set_face(first, CardFace::Hidden);
        session.set_face(second, CardFace::Hidden);
        session.set_turn(TurnState::Empty);

        if session.attempts_used() >= session.max_attempts() && session.matches() < session.pairs()
        {
            session.set_status(SessionStatus::Lost);
            session.disable_remaining();
            let attempts_used = session.attempts_used();
            tracing::info!(attempts_used, "session lost, attempt budget exhausted");
            ResolveOutcome::Lost { attempts_used }
        } else {
            ResolveOutcome::Continue
        }
    }
}
