//! Deck construction and lookup.
//!
//! A `Deck` is the full shuffled card sequence for one session: the first
//! `pairs` configured images, two cards per image with fresh `CardId`s, in a
//! uniformly random order.
//!
//! Invariants:
//! - length is exactly `2 * pairs` (always even)
//! - exactly two cards share each `PairId`
//! - every `CardId` is unique within the deck

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardImage};
use super::config::{ConfigError, LevelConfig};
use super::rng::GameRng;

/// The shuffled card sequence for a session.
///
/// Positions are stable after build; the presentation layer renders cards in
/// deck order and addresses them by `CardId`.
///
/// Serializes as the plain card sequence; the lookup index is rebuilt on
/// deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
    /// CardId -> position, for O(1) flip lookup.
    index: FxHashMap<CardId, usize>,
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self::from_cards(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

impl Deck {
    /// Build a shuffled deck from a validated configuration.
    ///
    /// Takes the first `pairs` images, generates two cards per image with
    /// fresh sequential ids, then applies a uniform permutation.
    pub fn build(config: &LevelConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let base = &config.images[..config.pairs as usize];
        Ok(Self::from_images(base, rng))
    }

    fn from_images(images: &[CardImage], rng: &mut GameRng) -> Self {
        let mut next_id = 0u32;
        let mut cards: Vec<Card> = Vec::with_capacity(images.len() * 2);

        for image in images {
            for _ in 0..2 {
                cards.push(Card::from_image(CardId::new(next_id), image));
                next_id += 1;
            }
        }

        rng.shuffle(&mut cards);
        Self::from_cards(cards)
    }

    fn from_cards(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.card_id, pos))
            .collect();
        Self { cards, index }
    }

    /// Number of cards (always `2 * pairs`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card by position.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&Card> {
        self.cards.get(pos)
    }

    /// Find a card's position by id.
    #[must_use]
    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.index.get(&card_id).copied()
    }

    /// Get a card by id.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.position_of(card_id).and_then(|pos| self.cards.get(pos))
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
