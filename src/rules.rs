//! Pure rule functions: legality of a play, its effect on the active suit,
//! win and stall detection. Nothing here touches game state.

use crate::cards::{Card, Suit};
use crate::game::Turn;

/// What playing a card does to the active suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayEffect {
    /// Suit in force after the play; `None` while an Eight still waits for
    /// its declaration.
    pub new_active_suit: Option<Suit>,
    pub requires_suit_declaration: bool,
}

/// Whether `candidate` may be played on `top` while `active_suit` is in force.
///
/// Eights are always playable. Otherwise the card must match the active suit
/// or the top card's rank. The top card's own suit does not count once an
/// Eight has overridden it.
///
/// ```
/// use crazy_eights::cards::{Card, Rank, Suit};
/// use crazy_eights::rules::is_playable;
///
/// let top = Card::new(Rank::Five, Suit::Clubs);
/// assert!(is_playable(Card::new(Rank::Five, Suit::Hearts), top, Suit::Clubs));
/// assert!(!is_playable(Card::new(Rank::Six, Suit::Clubs), top, Suit::Hearts));
/// ```
pub fn is_playable(candidate: Card, top: Card, active_suit: Suit) -> bool {
    candidate.is_wild() || candidate.suit() == active_suit || candidate.rank() == top.rank()
}

pub fn effect_of_play(card: Card, declared: Option<Suit>) -> PlayEffect {
    if card.is_wild() {
        PlayEffect { new_active_suit: declared, requires_suit_declaration: true }
    } else {
        PlayEffect { new_active_suit: Some(card.suit()), requires_suit_declaration: false }
    }
}

/// Winner after a play. Only meaningful right after a card left a hand;
/// both hands empty at once cannot happen since one action touches one hand.
pub fn check_winner(player_hand_len: usize, opponent_hand_len: usize) -> Option<Turn> {
    if player_hand_len == 0 {
        Some(Turn::Player)
    } else if opponent_hand_len == 0 {
        Some(Turn::Opponent)
    } else {
        None
    }
}

pub fn playable_cards(
    hand: &[Card],
    top: Card,
    active_suit: Suit,
) -> impl Iterator<Item = Card> + '_ {
    hand.iter().copied().filter(move |&c| is_playable(c, top, active_suit))
}

pub fn has_any_playable_card(hand: &[Card], top: Card, active_suit: Suit) -> bool {
    playable_cards(hand, top, active_suit).next().is_some()
}

/// No legal play and nothing left to draw: the only move is a skip.
pub fn is_stalled(hand: &[Card], top: Card, active_suit: Suit, deck_len: usize) -> bool {
    deck_len == 0 && !has_any_playable_card(hand, top, active_suit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank};

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn rank_match_beats_suit_mismatch() {
        assert!(is_playable(c("5h"), c("5c"), Suit::Clubs));
    }

    #[test]
    fn eights_always_playable() {
        for s in Suit::ALL {
            for top in parse_cards("2h Kd Ac 9s").unwrap() {
                assert!(is_playable(Card::new(Rank::Eight, s), top, Suit::Diamonds));
            }
        }
    }

    #[test]
    fn override_hides_top_card_suit() {
        // Top card is a Club eight but Hearts were declared.
        let top = c("8c");
        assert!(!is_playable(c("3c"), top, Suit::Hearts));
        assert!(is_playable(c("3h"), top, Suit::Hearts));
    }

    #[test]
    fn effect_of_plain_card_sets_its_suit() {
        let e = effect_of_play(c("Qd"), None);
        assert_eq!(e.new_active_suit, Some(Suit::Diamonds));
        assert!(!e.requires_suit_declaration);
    }

    #[test]
    fn effect_of_eight_uses_declared_suit() {
        let e = effect_of_play(c("8d"), Some(Suit::Spades));
        assert_eq!(e.new_active_suit, Some(Suit::Spades));
        assert!(e.requires_suit_declaration);
        let pending = effect_of_play(c("8d"), None);
        assert_eq!(pending.new_active_suit, None);
        assert!(pending.requires_suit_declaration);
    }

    #[test]
    fn winner_is_empty_hand() {
        assert_eq!(check_winner(0, 3), Some(Turn::Player));
        assert_eq!(check_winner(3, 0), Some(Turn::Opponent));
        assert_eq!(check_winner(1, 1), None);
    }

    #[test]
    fn stalled_needs_empty_deck_and_no_play() {
        let hand = parse_cards("2h 3d").unwrap();
        let top = c("Kc");
        assert!(!has_any_playable_card(&hand, top, Suit::Clubs));
        assert!(is_stalled(&hand, top, Suit::Clubs, 0));
        assert!(!is_stalled(&hand, top, Suit::Clubs, 1));
        assert!(!is_stalled(&hand, top, Suit::Hearts, 0));
        assert_eq!(playable_cards(&hand, top, Suit::Hearts).collect::<Vec<_>>(), vec![c("2h")]);
    }
}
