//! # memory-match
//!
//! A memory-matching (concentration) game engine: deck construction, flip
//! turn resolution, attempt accounting, and win/loss determination, with
//! persisted play statistics.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: rendering, timers, network transport, and durable
//!    storage are the host's job. The engine exposes explicit inputs
//!    (`setup_game`, `flip`, `resolve_mismatch`) and read accessors; hosts
//!    adapt UI events to those calls and react to the returned values.
//!
//! 2. **No ambient state**: everything lives in an owned `GameSession`;
//!    starting a new game replaces it wholesale and invalidates any pending
//!    deferred resolution via a generation tag.
//!
//! 3. **Deterministic when asked**: shuffles run on a seeded ChaCha8 RNG, so
//!    a session is reproducible from its seed.
//!
//! ## Modules
//!
//! - `core`: cards, decks, sessions, RNG, level configuration
//! - `engine`: the match engine and its result types
//! - `provider`: configuration sources with bundled fallback
//! - `stats`: persisted play statistics behind a store trait
//!
//! ## Quick Start
//!
//! ```
//! use memory_match::core::Level;
//! use memory_match::engine::{MatchEngine, TurnResult};
//! use memory_match::provider::{BundledProvider, ConfigProvider};
//! use memory_match::stats::MemoryStatsStore;
//!
//! let config = BundledProvider.fetch_config(Level::Easy).unwrap();
//! let mut engine = MatchEngine::new(MemoryStatsStore::new());
//! engine.setup_game(&config).unwrap();
//!
//! let card = engine.session().unwrap().deck().get(0).unwrap().card_id;
//! assert_eq!(engine.flip(card), TurnResult::Pending);
//! ```

pub mod core;
pub mod engine;
pub mod provider;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    fallback_config, Card, CardFace, CardId, CardImage, ConfigError, Deck, GameRng, GameSession,
    Level, LevelConfig, PairId, SessionStatus, TurnState,
};

pub use crate::engine::{
    MatchEngine, ResolutionTicket, ResolveOutcome, TurnResult, RESOLVE_DELAY,
};

pub use crate::provider::{
    parse_level_config, BundledProvider, ConfigProvider, ProviderError, RemoteProvider,
    WithFallback,
};

pub use crate::stats::{MemoryStatsStore, Stats, StatsStore, STATS_KEY};
