mod common;

use crazy_eights::agents::policy::{choose_action, OpponentAction};
use crazy_eights::cards::{CardId, Rank, Suit};
use crazy_eights::config::{DrawRule, GameConfig};
use crazy_eights::deck::{build_standard_deck, DECK_SIZE};
use crazy_eights::game::{Game, GameState, Intent, Phase, Turn};
use crazy_eights::rules::is_playable;
use proptest::prelude::*;
use std::sync::Arc;

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Hearts), Just(Suit::Diamonds), Just(Suit::Clubs), Just(Suit::Spades),]
}

fn any_turn() -> impl Strategy<Value = Turn> {
    prop_oneof![Just(Turn::Player), Just(Turn::Opponent)]
}

fn any_draw_rule() -> impl Strategy<Value = DrawRule> {
    prop_oneof![Just(DrawRule::KeepsTurn), Just(DrawRule::EndsTurn)]
}

/// Raw intents, mostly aimed at the game in progress but often illegal.
#[derive(Debug, Clone)]
enum Step {
    Play { actor: Turn, card: u8, declared: Option<Suit> },
    Draw { actor: Turn },
    Skip,
    Start,
    Reset,
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (any_turn(), 0u8..DECK_SIZE as u8, proptest::option::of(any_suit()))
            .prop_map(|(actor, card, declared)| Step::Play { actor, card, declared }),
        4 => any_turn().prop_map(|actor| Step::Draw { actor }),
        2 => Just(Step::Skip),
        1 => Just(Step::Start),
        1 => Just(Step::Reset),
    ]
}

fn apply(game: &mut Game, step: &Step) -> Option<Result<Arc<GameState>, String>> {
    let intent = match *step {
        Step::Play { actor, card, declared } => {
            Intent::PlayCard { actor, card: CardId(card), declared }
        }
        Step::Draw { actor } => Intent::DrawCard { actor },
        Step::Start => Intent::StartGame,
        Step::Reset => Intent::Reset,
        Step::Skip => {
            game.skip_if_stalled();
            return None;
        }
    };
    Some(game.submit(intent).map_err(|e| e.to_string()))
}

/// Legal move for whoever is to act, as the computer opponent would pick it.
fn policy_intent(st: &GameState) -> Option<Intent> {
    let actor = st.turn();
    let top = st.top_discard()?;
    let active = st.active_suit()?;
    match choose_action(st.hand(actor).as_slice(), top, active, st.deck_len())? {
        OpponentAction::Play { card, declared } => {
            Some(Intent::PlayCard { actor, card: card.id(), declared })
        }
        OpponentAction::Draw => Some(Intent::DrawCard { actor }),
        _ => None,
    }
}

/// Every (candidate, top, active suit) triple: playable exactly when the
/// candidate is an Eight, follows the active suit, or matches the top's rank.
#[test]
fn playability_is_exactly_the_three_rules() {
    let deck = build_standard_deck();
    let mut checked = 0;
    for &candidate in &deck {
        for &top in &deck {
            for active in Suit::ALL {
                let expected = candidate.rank() == Rank::Eight
                    || candidate.suit() == active
                    || candidate.rank() == top.rank();
                assert_eq!(
                    is_playable(candidate, top, active),
                    expected,
                    "{candidate} on {top} with {active:?} active"
                );
                checked += 1;
            }
        }
    }
    assert_eq!(checked, DECK_SIZE * DECK_SIZE * Suit::ALL.len());
}

proptest! {
    #[test]
    fn cards_are_conserved(seed in any::<u64>(), rule in any_draw_rule(),
                           steps in proptest::collection::vec(any_step(), 1..120)) {
        common::init_logging();
        let mut game = Game::new(GameConfig::default().with_seed(seed).with_draw_rule(rule));
        game.submit(Intent::StartGame).unwrap();
        for step in &steps {
            apply(&mut game, step);
            prop_assert_eq!(game.state().card_count(), DECK_SIZE);
        }
    }

    #[test]
    fn rejected_intents_change_nothing(seed in any::<u64>(),
                                       steps in proptest::collection::vec(any_step(), 1..120)) {
        let mut game = Game::new(GameConfig::default().with_seed(seed));
        game.submit(Intent::StartGame).unwrap();
        for step in &steps {
            let before = game.snapshot();
            let history = game.history_len();
            if let Some(Err(_)) = apply(&mut game, step) {
                prop_assert!(Arc::ptr_eq(&before, &game.snapshot()));
                prop_assert_eq!(game.history_len(), history);
            }
        }
    }

    #[test]
    fn accepted_plays_were_legal(seed in any::<u64>(),
                                 steps in proptest::collection::vec(any_step(), 1..120)) {
        let mut game = Game::new(GameConfig::default().with_seed(seed));
        game.submit(Intent::StartGame).unwrap();
        for step in &steps {
            let before = game.snapshot();
            if let (Step::Play { actor, card, declared }, Some(Ok(after))) =
                (step, apply(&mut game, step))
            {
                let played = before.hand(*actor).get(CardId(*card));
                prop_assert!(played.is_some(), "played card was in hand");
                let played = played.unwrap();
                prop_assert_eq!(before.phase(), Phase::Playing);
                prop_assert_eq!(before.turn(), *actor);
                prop_assert!(before.can_play(played));
                prop_assert_eq!(played.is_wild(), declared.is_some());
                prop_assert_eq!(after.top_discard(), Some(played));
                let expected_suit = if played.is_wild() { *declared } else { Some(played.suit()) };
                prop_assert_eq!(after.active_suit(), expected_suit);
                if after.phase() == Phase::GameOver {
                    prop_assert!(after.hand(*actor).is_empty());
                    prop_assert_eq!(after.winner(), Some(*actor));
                } else {
                    prop_assert_eq!(after.turn(), actor.other());
                }
            }
        }
    }

    #[test]
    fn policy_moves_are_always_accepted(seed in any::<u64>(), rule in any_draw_rule()) {
        let mut game = Game::new(GameConfig::default().with_seed(seed).with_draw_rule(rule));
        game.submit(Intent::StartGame).unwrap();
        for _ in 0..400 {
            if game.state().phase() == Phase::GameOver || game.state().is_deadlocked() {
                break;
            }
            match policy_intent(game.state()) {
                Some(intent) => {
                    prop_assert!(game.submit(intent).is_ok());
                }
                None => prop_assert!(game.skip_if_stalled()),
            }
            prop_assert_eq!(game.state().card_count(), DECK_SIZE);
        }
    }
}
