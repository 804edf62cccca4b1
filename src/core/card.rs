//! Card identity and runtime card state.
//!
//! ## ID Layout
//!
//! Two identifier types with different lifetimes:
//! - `PairId`: the image identity from configuration. Exactly two cards in a
//!   deck share a `PairId`; matching means comparing them.
//! - `CardId`: a fresh unique identifier allocated per card at deck build.
//!   Distinguishes the two halves of a pair and addresses flips.
//!
//! `CardId`s are never reused within a deck; a new deck allocates fresh ones.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single card in a deck.
///
/// Allocated sequentially at deck build; opaque to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Image identity shared by the two cards of a pair.
///
/// Carries the `id` field of the configured `CardImage`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId(pub String);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw image identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// A card image supplied by configuration. Immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImage {
    /// Image identifier; becomes the `PairId` of both generated cards.
    pub id: String,
    /// Image URL for the presentation layer.
    pub url: String,
    /// Alt text for the presentation layer.
    pub alt: String,
}

impl CardImage {
    /// Create a card image.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            alt: alt.into(),
        }
    }
}

/// A single card in a deck.
///
/// Two cards are generated per `CardImage` (equal `pair_id`, distinct
/// `card_id`). Created at deck build, dropped with the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique per-card identifier.
    pub card_id: CardId,
    /// Image identity; two cards per deck share each value.
    pub pair_id: PairId,
    /// Image URL.
    pub url: String,
    /// Alt text.
    pub alt: String,
}

impl Card {
    /// Create a card from an image with a fresh card ID.
    #[must_use]
    pub fn from_image(card_id: CardId, image: &CardImage) -> Self {
        Self {
            card_id,
            pair_id: PairId::new(image.id.clone()),
            url: image.url.clone(),
            alt: image.alt.clone(),
        }
    }

    /// Check whether two cards form a pair.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id
    }
}

/// Visual state of a card as seen by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down, selectable.
    Hidden,
    /// Face up, part of the current turn.
    Revealed,
    /// Permanently out of play (matched, or session lost).
    Disabled,
}

impl CardFace {
    /// Whether a card in this state may be selected.
    #[must_use]
    pub const fn selectable(self) -> bool {
        matches!(self, CardFace::Hidden)
    }
}
