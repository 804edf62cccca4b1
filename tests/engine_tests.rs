//! Match engine integration tests.
//!
//! These tests drive full sessions through the public API: setup, the flip
//! state machine, deferred mismatch resolution, terminal states, and stats
//! wiring.

use memory_match::core::{
    CardFace, CardId, CardImage, GameSession, Level, LevelConfig, SessionStatus, TurnState,
};
use memory_match::engine::{MatchEngine, ResolveOutcome, TurnResult};
use memory_match::stats::{MemoryStatsStore, Stats, StatsStore};

/// Minimal config: `pairs` images, explicit attempt budget.
fn tiny_config(pairs: u32, max_attempts: u32) -> LevelConfig {
    let images = (1..=pairs)
        .map(|i| {
            CardImage::new(
                format!("img{i}"),
                format!("https://img.test/{i}"),
                format!("Image {i}"),
            )
        })
        .collect();

    LevelConfig {
        name: "Memory Game".to_string(),
        level: Level::Easy,
        pairs,
        max_attempts,
        images,
    }
}

fn new_engine(pairs: u32, max_attempts: u32) -> MatchEngine<MemoryStatsStore> {
    let mut engine = MatchEngine::with_seed(MemoryStatsStore::new(), 42);
    engine.setup_game(&tiny_config(pairs, max_attempts)).unwrap();
    engine
}

/// Both card ids of a pair, in deck order.
fn cards_of_pair(session: &GameSession, pair: &str) -> (CardId, CardId) {
    let ids: Vec<CardId> = session
        .deck()
        .iter()
        .filter(|c| c.pair_id.as_str() == pair)
        .map(|c| c.card_id)
        .collect();
    assert_eq!(ids.len(), 2, "expected exactly two cards for pair {pair}");
    (ids[0], ids[1])
}

// =============================================================================
// Worked Examples (pairs=2, maxAttempts=5)
// =============================================================================

/// Perfect game: two matches in two attempts, final score 2.
#[test]
fn test_perfect_game_wins_with_score_two() {
    let mut engine = new_engine(2, 5);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, b2) = cards_of_pair(engine.session().unwrap(), "img2");

    assert_eq!(engine.flip(a1), TurnResult::Pending);
    assert_eq!(
        engine.flip(a2),
        TurnResult::Matched {
            matches: 1,
            won: false
        }
    );
    assert_eq!(engine.session().unwrap().attempts_used(), 1);

    assert_eq!(engine.flip(b1), TurnResult::Pending);
    assert_eq!(
        engine.flip(b2),
        TurnResult::Matched {
            matches: 2,
            won: true
        }
    );

    let session = engine.session().unwrap();
    assert_eq!(session.status(), SessionStatus::Won);
    assert_eq!(session.attempts_used(), 2);
    assert_eq!(engine.stats().best, Some(2));
}

/// Mismatch: one attempt charged, both cards hidden again after resolution,
/// neither disabled.
#[test]
fn test_mismatch_flips_back() {
    let mut engine = new_engine(2, 5);
    let (a1, _) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    assert_eq!(engine.flip(a1), TurnResult::Pending);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };
    assert_eq!(ticket.first(), a1);
    assert_eq!(ticket.second(), b1);
    assert_eq!(engine.session().unwrap().attempts_used(), 1);

    // Cards stay revealed until the deferred resolution.
    assert_eq!(engine.session().unwrap().face(a1), Some(CardFace::Revealed));
    assert_eq!(engine.session().unwrap().face(b1), Some(CardFace::Revealed));

    assert_eq!(engine.resolve_mismatch(ticket), ResolveOutcome::Continue);

    let session = engine.session().unwrap();
    assert_eq!(session.face(a1), Some(CardFace::Hidden));
    assert_eq!(session.face(b1), Some(CardFace::Hidden));
    assert_eq!(session.turn(), TurnState::Empty);
    assert_eq!(session.status(), SessionStatus::InProgress);
}

// =============================================================================
// Flip State Machine
// =============================================================================

/// Re-selecting the unresolved first card is a no-op and never charges.
#[test]
fn test_same_card_twice_charges_nothing() {
    let mut engine = new_engine(2, 5);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");

    assert_eq!(engine.flip(a1), TurnResult::Pending);
    assert_eq!(engine.flip(a1), TurnResult::Ignored);
    assert_eq!(engine.session().unwrap().attempts_used(), 0);

    // The turn is still live; completing it charges exactly one attempt.
    assert_eq!(
        engine.flip(a2),
        TurnResult::Matched {
            matches: 1,
            won: false
        }
    );
    assert_eq!(engine.session().unwrap().attempts_used(), 1);
}

/// A third flip while a mismatch is resolving is rejected.
#[test]
fn test_resolving_locks_board() {
    let mut engine = new_engine(2, 5);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };

    assert_eq!(engine.flip(a2), TurnResult::Ignored);
    assert_eq!(engine.session().unwrap().attempts_used(), 1);

    // Unlocked after resolution.
    engine.resolve_mismatch(ticket);
    assert_eq!(engine.flip(a2), TurnResult::Pending);
}

/// Matched cards are permanently out of play.
#[test]
fn test_matched_cards_disabled() {
    let mut engine = new_engine(2, 5);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");

    engine.flip(a1);
    engine.flip(a2);

    assert_eq!(engine.session().unwrap().face(a1), Some(CardFace::Disabled));
    assert_eq!(engine.session().unwrap().face(a2), Some(CardFace::Disabled));
    assert_eq!(engine.flip(a1), TurnResult::Ignored);
    assert_eq!(engine.flip(a2), TurnResult::Ignored);
}

/// Attempts increase by exactly one per completed comparison, match or not.
#[test]
fn test_attempt_accounting() {
    let mut engine = new_engine(3, 10);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    // Mismatch: +1
    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };
    engine.resolve_mismatch(ticket);
    assert_eq!(engine.session().unwrap().attempts_used(), 1);

    // Match: +1
    engine.flip(a1);
    engine.flip(a2);
    assert_eq!(engine.session().unwrap().attempts_used(), 2);
}

// =============================================================================
// Loss Path
// =============================================================================

/// Exhausting the budget without matching everything loses the session and
/// disables all remaining cards.
#[test]
fn test_loss_on_budget_exhaustion() {
    let mut engine = new_engine(2, 1);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };

    // Loss is declared at resolution time, not at the flip.
    assert_eq!(
        engine.session().unwrap().status(),
        SessionStatus::InProgress
    );

    assert_eq!(
        engine.resolve_mismatch(ticket),
        ResolveOutcome::Lost { attempts_used: 1 }
    );

    let session = engine.session().unwrap();
    assert_eq!(session.status(), SessionStatus::Lost);
    assert_eq!(session.attempts_left(), 0);
    assert!(session.board().all(|(_, face)| face == CardFace::Disabled));

    // Terminal session rejects everything.
    assert_eq!(engine.flip(a2), TurnResult::Ignored);
}

/// A match on the last attempt that finishes the deck still wins.
#[test]
fn test_win_on_last_attempt() {
    let mut engine = new_engine(1, 1);
    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");

    engine.flip(a1);
    assert_eq!(
        engine.flip(a2),
        TurnResult::Matched {
            matches: 1,
            won: true
        }
    );
    assert_eq!(engine.session().unwrap().status(), SessionStatus::Won);
}

/// `attempts_used` never exceeds the budget, whatever the input sequence.
#[test]
fn test_attempts_never_exceed_budget() {
    let mut engine = new_engine(3, 2);
    let session = engine.session().unwrap();
    let ids: Vec<CardId> = session.deck().iter().map(|c| c.card_id).collect();

    // Hammer every card repeatedly, resolving whenever the board locks.
    for _ in 0..4 {
        for &id in &ids {
            if let TurnResult::Mismatched { ticket } = engine.flip(id) {
                engine.resolve_mismatch(ticket);
            }
            let session = engine.session().unwrap();
            assert!(session.attempts_used() <= session.max_attempts());
        }
    }
}

// =============================================================================
// Session Replacement & Stale Tickets
// =============================================================================

/// A resolution ticket from a replaced session is a no-op.
#[test]
fn test_stale_ticket_is_noop() {
    let mut engine = new_engine(2, 5);
    let (a1, _) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };

    // New game starts while the flip-back delay is "pending".
    engine.setup_game(&tiny_config(2, 5)).unwrap();

    assert_eq!(engine.resolve_mismatch(ticket), ResolveOutcome::Stale);

    // The fresh session is untouched.
    let session = engine.session().unwrap();
    assert_eq!(session.attempts_used(), 0);
    assert_eq!(session.turn(), TurnState::Empty);
    assert!(session.board().all(|(_, face)| face == CardFace::Hidden));
}

/// Resolving twice is harmless: the second call finds no resolving turn.
#[test]
fn test_double_resolve_is_noop() {
    let mut engine = new_engine(2, 5);
    let (a1, _) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };

    assert_eq!(engine.resolve_mismatch(ticket), ResolveOutcome::Continue);
    assert_eq!(engine.resolve_mismatch(ticket), ResolveOutcome::Stale);
    assert_eq!(engine.session().unwrap().attempts_used(), 1);
}

// =============================================================================
// Stats Wiring
// =============================================================================

/// `played` increments once per setup, `best` only on wins.
#[test]
fn test_played_counts_setups() {
    let mut engine = MatchEngine::with_seed(MemoryStatsStore::new(), 42);
    engine.setup_game(&tiny_config(2, 5)).unwrap();
    engine.setup_game(&tiny_config(2, 5)).unwrap();
    engine.setup_game(&tiny_config(2, 5)).unwrap();

    assert_eq!(
        engine.stats(),
        Stats {
            played: 3,
            best: None
        }
    );
}

/// First win sets `best`; worse later wins leave it alone.
#[test]
fn test_best_keeps_minimum() {
    let mut store = MemoryStatsStore::new();
    store.write(&Stats {
        played: 10,
        best: Some(1),
    });

    let mut engine = MatchEngine::with_seed(store, 42);
    engine.setup_game(&tiny_config(2, 5)).unwrap();

    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, b2) = cards_of_pair(engine.session().unwrap(), "img2");
    engine.flip(a1);
    engine.flip(a2);
    engine.flip(b1);
    engine.flip(b2);

    // Won in 2 attempts, but the stored best of 1 stands.
    assert_eq!(engine.session().unwrap().status(), SessionStatus::Won);
    assert_eq!(engine.stats().best, Some(1));
    assert_eq!(engine.stats().played, 11);
}

/// A better score replaces the stored best.
#[test]
fn test_best_improves() {
    let mut store = MemoryStatsStore::new();
    store.write(&Stats {
        played: 4,
        best: Some(9),
    });

    let mut engine = MatchEngine::with_seed(store, 42);
    engine.setup_game(&tiny_config(1, 5)).unwrap();

    let (a1, a2) = cards_of_pair(engine.session().unwrap(), "img1");
    engine.flip(a1);
    engine.flip(a2);

    assert_eq!(engine.stats().best, Some(1));
}

/// Losing never touches `best`.
#[test]
fn test_loss_leaves_best_untouched() {
    let mut engine = new_engine(2, 1);
    let (a1, _) = cards_of_pair(engine.session().unwrap(), "img1");
    let (b1, _) = cards_of_pair(engine.session().unwrap(), "img2");

    engine.flip(a1);
    let TurnResult::Mismatched { ticket } = engine.flip(b1) else {
        panic!("expected mismatch");
    };
    engine.resolve_mismatch(ticket);

    assert_eq!(engine.stats().best, None);
    assert_eq!(engine.stats().played, 1);
}
