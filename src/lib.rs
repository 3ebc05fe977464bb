//! crazy-eights: a two-player Crazy Eights rules engine
//!
//! Goals:
//! - Every move validated against the rules before it touches the game
//! - Immutable snapshots: each accepted intent publishes a fresh `GameState`
//! - Reproducible deals from a seed
//! - No panics for illegal moves; they come back as `ActionError`
//!
//! ## Quick start: deal and play
//! ```
//! use crazy_eights::config::GameConfig;
//! use crazy_eights::game::{Game, Intent, Phase, Turn};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(7));
//! let state = game.submit(Intent::StartGame).unwrap();
//! assert_eq!(state.phase(), Phase::Playing);
//! assert_eq!(state.player_hand().len(), 8);
//! assert_eq!(state.card_count(), 52);
//!
//! // Play the first legal card, or draw.
//! let intent = match state.playable_cards(Turn::Player).first() {
//!     Some(card) if card.is_wild() => Intent::PlayCard {
//!         actor: Turn::Player,
//!         card: card.id(),
//!         declared: Some(card.suit()),
//!     },
//!     Some(card) => Intent::PlayCard { actor: Turn::Player, card: card.id(), declared: None },
//!     None => Intent::DrawCard { actor: Turn::Player },
//! };
//! let next = game.submit(intent).unwrap();
//! assert_eq!(next.card_count(), 52);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin crazy-eights
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod observe;
pub mod rules;
pub mod telemetry;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
