use crate::cards::{Card, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in the only supported deck.
pub const DECK_SIZE: usize = 52;

/// Source of uniform indices for shuffling.
///
/// Production code adapts a `rand` RNG; tests can script the exact sequence.
pub trait RandomSource {
    /// A uniformly chosen index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Adapts any [`rand::Rng`] to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.0.random_range(0..upper)
    }
}

impl RngSource<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// A standard 52-card deck.
///
/// Index 0 is the deal end; the last card is the draw end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the canonical order: suits outer in [`Suit::ALL`] order, ranks
    /// inner from Two to Ace. Card ids equal their index.
    ///
    /// ```
    /// use crazy_eights::cards::{Card, Rank, Suit};
    /// use crazy_eights::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.as_slice()[0], Card::new(Rank::Two, Suit::Hearts));
    /// ```
    pub fn standard() -> Self {
        Self { cards: build_standard_deck() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
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

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(ChaCha8Rng::seed_from_u64(seed));
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng>(&mut self, rng: R) {
        shuffle(&mut self.cards, &mut RngSource(rng));
    }

    /// Shuffle with an arbitrary index source.
    pub fn shuffle_from(&mut self, source: &mut dyn RandomSource) {
        shuffle(&mut self.cards, source);
    }

    /// Draw one card from the draw end.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

/// One card per (suit, rank) pair, suits outer, ranks inner.
pub fn build_standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for s in Suit::ALL {
        for r in Rank::ALL {
            cards.push(Card::new(r, s));
        }
    }
    cards
}

/// Fisher–Yates: for `i` from the last index down to 1, swap `i` with
/// `source.next_index(i + 1)`.
pub fn shuffle(cards: &mut [Card], source: &mut dyn RandomSource) {
    for i in (1..cards.len()).rev() {
        let j = source.next_index(i + 1);
        cards.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Always picks the upper bound minus one, which leaves the order intact.
    struct Identity;
    impl RandomSource for Identity {
        fn next_index(&mut self, upper: usize) -> usize {
            upper - 1
        }
    }

    struct Zero;
    impl RandomSource for Zero {
        fn next_index(&mut self, _upper: usize) -> usize {
            0
        }
    }

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let faces: HashSet<(Suit, Rank)> =
            d.as_slice().iter().map(|c| (c.suit(), c.rank())).collect();
        assert_eq!(faces.len(), 52);
        let ids: HashSet<_> = d.as_slice().iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn standard_order_is_suits_outer_ranks_inner() {
        let d = Deck::standard();
        let cards = d.as_slice();
        assert_eq!(cards[0], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(cards[12], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(cards[13], Card::new(Rank::Two, Suit::Diamonds));
        assert_eq!(cards[26], Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(cards[51], Card::new(Rank::Ace, Suit::Spades));
        for (i, c) in cards.iter().enumerate() {
            assert_eq!(c.id().0 as usize, i);
        }
        assert_eq!(build_standard_deck(), cards.to_vec());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1, Deck::standard());
    }

    #[test]
    fn seeded_shuffle_matches_the_engine_source() {
        let mut by_rng = Deck::standard();
        by_rng.shuffle_seeded(2024);
        let mut by_source = Deck::standard();
        by_source.shuffle_from(&mut RngSource::seeded(2024));
        assert_eq!(by_rng, by_source);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut d = Deck::standard();
        d.shuffle_seeded(7);
        let mut ids: Vec<u8> = d.as_slice().iter().map(|c| c.id().0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..52).collect::<Vec<u8>>());
    }

    #[test]
    fn scripted_identity_source_keeps_order() {
        let mut d = Deck::standard();
        d.shuffle_from(&mut Identity);
        assert_eq!(d, Deck::standard());
    }

    #[test]
    fn scripted_zero_source_rotates_left() {
        let mut d = Deck::standard();
        d.shuffle_from(&mut Zero);
        let base = build_standard_deck();
        assert_eq!(d.as_slice()[0], base[1]);
        assert_eq!(d.as_slice()[50], base[51]);
        assert_eq!(d.as_slice()[51], base[0]);
    }

    #[test]
    fn draw_takes_from_the_end() {
        let mut d = Deck::standard();
        let c1 = d.draw().unwrap();
        assert_eq!(c1, Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(d.len(), 51);
        let mut empty = Deck::from_cards(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.draw().is_none());
    }
}
