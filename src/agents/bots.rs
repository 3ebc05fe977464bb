use crate::engine::GameEngine;
use crate::game::{ActionError, Phase, Turn};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};
use tracing::trace;

use super::policy::{choose_action, OpponentAction};
use super::{AgentKind, PlayerAgent};

/// Pacing and randomness for a computer opponent.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    /// Thinking time is drawn uniformly from `min_delay_ms..=max_delay_ms`.
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Fixed thinking time, no jitter.
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self { min_delay_ms: delay_ms, max_delay_ms: delay_ms, rng_seed: None }
    }

    /// Thinking time jittered between `min` and `max`.
    pub fn with_delay_range_ms(mut self, min: u64, max: u64) -> Self {
        self.min_delay_ms = min;
        self.max_delay_ms = max;
        self
    }

    /// Set a deterministic RNG seed for reproducible pacing.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::with_delay_ms(0)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// Computer opponent driven by [`choose_action`]. Waits out its thinking
/// time across ticks before committing a move.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Turn) -> Result<bool, ActionError> {
        if engine.phase() != Phase::Playing || engine.turn() != seat {
            self.next_action_at = None;
            return Ok(false);
        }
        let (Some(top), Some(active)) = (engine.top_discard(), engine.active_suit()) else {
            return Ok(false);
        };
        let Some(action) = choose_action(engine.hand(seat), top, active, engine.deck_len()) else {
            // Stalled: the table's skip handles it.
            self.next_action_at = None;
            return Ok(false);
        };

        let now = Instant::now();
        match self.next_action_at {
            None => {
                let delay = choose_delay_ms(&self.profile, &mut self.state);
                if delay > 0 {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
            }
            Some(next) if now < next => return Ok(false),
            Some(_) => {}
        }
        self.next_action_at = None;

        trace!(%seat, ?action, "bot decided");
        match action {
            OpponentAction::Play { card, declared } => engine.play_card(seat, card.id(), declared),
            OpponentAction::Draw => engine.draw_card(seat),
        }
        .map(|_| true)
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};
    use crate::config::GameConfig;
    use crate::game::{Game, GameState};
    use std::thread;

    fn table(opponent: &str, deck: &str) -> Game {
        let state = GameState::arrange(
            parse_cards(deck).unwrap(),
            "5c".parse().unwrap(),
            parse_cards("9h Kd").unwrap(),
            parse_cards(opponent).unwrap(),
            Turn::Opponent,
            Suit::Clubs,
        )
        .unwrap();
        Game::resume(GameConfig::default().with_seed(1), state)
    }

    #[test]
    fn delay_throttles_the_move() {
        let mut g = table("3c 4d", "2s");
        let mut bot = BotAgent::new(BotProfile::with_delay_ms(15).with_seed(7));

        // First tick only schedules.
        assert!(!bot.on_turn(&mut g, Turn::Opponent).unwrap());
        assert_eq!(g.state().turn(), Turn::Opponent);
        assert_eq!(g.state().opponent_hand().len(), 2);

        thread::sleep(Duration::from_millis(20));
        assert!(bot.on_turn(&mut g, Turn::Opponent).unwrap());
        assert_eq!(g.state().turn(), Turn::Player);
        assert_eq!(g.state().top_discard(), Some("3c".parse().unwrap()));
    }

    #[test]
    fn jitter_stays_in_range() {
        let profile = BotProfile::default().with_delay_range_ms(10, 30).with_seed(3);
        let mut state = BotState::new(profile.rng_seed);
        for _ in 0..50 {
            let d = choose_delay_ms(&profile, &mut state);
            assert!((10..=30).contains(&d));
        }
    }

    #[test]
    fn idle_outside_its_turn_or_when_stalled() {
        let mut g = table("3c", "2s");
        let mut bot = BotAgent::new(BotProfile::default());
        assert!(!bot.on_turn(&mut g, Turn::Player).unwrap());

        let mut stuck = table("4d 2h", "");
        assert!(!bot.on_turn(&mut stuck, Turn::Opponent).unwrap());
        assert_eq!(stuck.state().turn(), Turn::Opponent);
    }
}
