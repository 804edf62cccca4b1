//! Core engine types: cards, decks, sessions, RNG, configuration.
//!
//! This module contains the fundamental building blocks. The presentation
//! layer consumes these through `crate::engine` rather than mutating them
//! directly.

pub mod card;
pub mod config;
pub mod deck;
pub mod rng;
pub mod session;

pub use card::{Card, CardFace, CardId, CardImage, PairId};
pub use config::{fallback_config, ConfigError, Level, LevelConfig};
pub use deck::Deck;
pub use rng::GameRng;
pub use session::{GameSession, SessionStatus, TurnState};
