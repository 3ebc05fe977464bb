//! Shared helpers for integration tests.
#![allow(dead_code)]

use crazy_eights::cards::{parse_cards, Card, Suit};
use crazy_eights::config::GameConfig;
use crazy_eights::deck::RandomSource;
use crazy_eights::game::{Game, GameState, Turn};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Route engine events to the test writer. Level from `TEST_LOG`, then
/// `RUST_LOG`, else `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt().with_env_filter(filter).with_test_writer().without_time().try_init().ok();
    });
}

/// Shuffle source that always picks the last index, leaving the deck unshuffled.
pub struct Identity;

impl RandomSource for Identity {
    fn next_index(&mut self, upper: usize) -> usize {
        upper - 1
    }
}

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

pub fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

/// A game already in progress. `deck` is drawn from its last card; the
/// remaining cards sit under `top`.
pub fn table(
    deck: &str,
    top: &str,
    player: &str,
    opponent: &str,
    turn: Turn,
    active: Suit,
) -> Game {
    init_logging();
    let (player, opponent) = (cards(player), cards(opponent));
    let state = GameState::arrange(cards(deck), card(top), player, opponent, turn, active)
        .expect("valid table");
    Game::resume(GameConfig::default().with_seed(1).without_delays(), state)
}
