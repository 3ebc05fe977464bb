use crate::cards::{parse_cards, Card, CardId};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate card id {0} in hand")]
    DuplicateCard(CardId),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// Cards held by one participant, in the order they arrived.
///
/// ```
/// use crazy_eights::cards::{Card, Rank, Suit};
/// use crazy_eights::hand::Hand;
///
/// let hand: Hand = "8h 3c".parse().unwrap();
/// let eight = Card::new(Rank::Eight, Suit::Hearts);
/// assert_eq!(hand.get(eight.id()), Some(eight));
/// assert_eq!(hand.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        for (i, c) in cards.iter().enumerate() {
            if cards[..i].iter().any(|o| o.id() == c.id()) {
                return Err(HandError::DuplicateCard(c.id()));
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.cards.iter().copied().find(|c| c.id() == id)
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the card with `id`, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id() == id)?;
        Some(self.cards.remove(pos))
    }

    /// Number of cards of each suit, indexed by [`crate::cards::Suit::index`].
    pub fn suit_counts(&self) -> [usize; 4] {
        suit_counts(&self.cards)
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Hand::try_new(cards)
    }
}

pub(crate) fn suit_counts(cards: &[Card]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for c in cards {
        counts[c.suit().index()] += 1;
    }
    counts
}

/// Played cards in order; the last one is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}
