//! Move selection for the computer opponent. Pure functions over the visible
//! table; nothing here touches `Game`.

use crate::cards::{Card, Suit};
use crate::hand::suit_counts;
use crate::rules;

/// What the opponent wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OpponentAction {
    Play { card: Card, declared: Option<Suit> },
    Draw,
}

/// Pick a move for `hand`.
///
/// Plain cards are preferred over Eights, both in hand order. With nothing
/// playable the opponent draws, or returns `None` on an empty deck and waits
/// for the stall skip.
///
/// ```
/// use crazy_eights::agents::policy::{choose_action, OpponentAction};
/// use crazy_eights::cards::{parse_cards, Suit};
///
/// let hand = parse_cards("8h 3c").unwrap();
/// let top = "Kc".parse().unwrap();
/// let action = choose_action(&hand, top, Suit::Clubs, 10);
/// assert_eq!(action, Some(OpponentAction::Play { card: hand[1], declared: None }));
/// ```
pub fn choose_action(
    hand: &[Card],
    top: Card,
    active_suit: Suit,
    deck_len: usize,
) -> Option<OpponentAction> {
    let mut first_eight = None;
    for card in rules::playable_cards(hand, top, active_suit) {
        if !card.is_wild() {
            return Some(OpponentAction::Play { card, declared: None });
        }
        first_eight.get_or_insert(card);
    }
    if let Some(card) = first_eight {
        return Some(OpponentAction::Play { card, declared: Some(choose_suit(hand)) });
    }
    if deck_len > 0 {
        Some(OpponentAction::Draw)
    } else {
        None
    }
}

/// Most frequent suit in `hand`, counting every card including Eights.
/// Ties go to the earlier suit in [`Suit::ALL`]; an empty hand gives Spades.
pub fn choose_suit(hand: &[Card]) -> Suit {
    if hand.is_empty() {
        return Suit::Spades;
    }
    let counts = suit_counts(hand);
    let mut best = Suit::ALL[0];
    for suit in Suit::ALL {
        if counts[suit.index()] > counts[best.index()] {
            best = suit;
        }
    }
    best
}
