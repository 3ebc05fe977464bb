// Game engine API boundary. This trait exposes the actions and queries agents
// and UIs need to drive a game without depending on `Game` internals. It is
// implemented for the core `Game` type.

use crate::cards::{Card, CardId, Suit};
use crate::game::{ActionError, GameState, Phase, Turn};
use std::sync::Arc;

pub trait GameEngine {
    // Lifecycle
    fn start(&mut self) -> Result<(), ActionError>;
    fn reset(&mut self);

    // Actions for whoever holds the turn
    fn play_card(
        &mut self,
        actor: Turn,
        card: CardId,
        declared: Option<Suit>,
    ) -> Result<(), ActionError>;
    fn draw_card(&mut self, actor: Turn) -> Result<(), ActionError>;
    fn skip_if_stalled(&mut self) -> bool;

    // Queries
    fn snapshot(&self) -> Arc<GameState>;
    fn turn(&self) -> Turn;
    fn phase(&self) -> Phase;
    fn hand(&self, seat: Turn) -> &[Card];
    fn top_discard(&self) -> Option<Card>;
    fn active_suit(&self) -> Option<Suit>;
    fn deck_len(&self) -> usize;
    fn is_stalled(&self) -> bool;
}

impl GameEngine for crate::game::Game {
    fn start(&mut self) -> Result<(), ActionError> {
        self.start()
    }
    fn reset(&mut self) {
        self.reset();
    }

    fn play_card(
        &mut self,
        actor: Turn,
        card: CardId,
        declared: Option<Suit>,
    ) -> Result<(), ActionError> {
        self.play_card(actor, card, declared)
    }
    fn draw_card(&mut self, actor: Turn) -> Result<(), ActionError> {
        self.draw_card(actor)
    }
    fn skip_if_stalled(&mut self) -> bool {
        self.skip_if_stalled()
    }

    fn snapshot(&self) -> Arc<GameState> {
        self.snapshot()
    }
    fn turn(&self) -> Turn {
        self.state().turn()
    }
    fn phase(&self) -> Phase {
        self.state().phase()
    }
    fn hand(&self, seat: Turn) -> &[Card] {
        self.state().hand(seat).as_slice()
    }
    fn top_discard(&self) -> Option<Card> {
        self.state().top_discard()
    }
    fn active_suit(&self) -> Option<Suit> {
        self.state().active_suit()
    }
    fn deck_len(&self) -> usize {
        self.state().deck_len()
    }
    fn is_stalled(&self) -> bool {
        self.state().is_stalled()
    }
}
