//! Agents: pluggable participants (the computer opponent, humans via a UI).
//!
//! This module introduces a small trait `PlayerAgent` and a manager
//! `AgentTable` that coordinates which agent controls which participant and
//! applies the stall skip. It lives in the library so UIs stay thin and scene
//! logic does not need to schedule the opponent.

use crate::cards::{CardId, Suit};
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::game::{ActionError, Phase, Turn};
use core::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Kinds of agents attached to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Move intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Play { card: CardId, declared: Option<Suit> },
    Draw,
}

/// Controller that can act for a participant when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` is to act. Implementations may throttle internally.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Turn) -> Result<bool, ActionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an action intent; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

mod bots;
pub mod policy;

pub use bots::{BotAgent, BotProfile};

/// Executes user-intended actions when it's their turn.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Turn) -> Result<bool, ActionError> {
        if engine.phase() != Phase::Playing {
            self.pending = None;
            return Ok(false);
        }
        if engine.turn() != seat {
            return Ok(false);
        }
        if let Some(act) = self.pending.take() {
            return match act {
                Action::Play { card, declared } => engine.play_card(seat, card, declared),
                Action::Draw => engine.draw_card(seat),
            }
            .map(|_| true);
        }
        Ok(false)
    }
}

/// One optional agent per participant; drives whichever is to act and skips
/// a stalled participant after `stall_delay`.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
    stall_delay: Duration,
    skip_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// A table with no agents and no delays.
    pub fn new() -> Self {
        Self {
            seats: [None, None],
            stall_delay: Duration::ZERO,
            skip_at: None,
        }
    }

    /// Human Player against a bot Opponent, paced by `config`.
    pub fn human_vs_bot(config: &GameConfig) -> Self {
        let mut profile = BotProfile::with_delay_ms(config.opponent_delay_ms);
        if let Some(seed) = config.seed {
            profile = profile.with_seed(seed);
        }
        let mut table = Self::new();
        table.set_agent(Turn::Player, Some(Box::new(HumanAgent::new())));
        table.set_agent(Turn::Opponent, Some(Box::new(BotAgent::new(profile))));
        table.set_stall_delay_ms(config.stall_delay_ms);
        table
    }

    /// Assign an agent to a participant (or remove when `None`).
    pub fn set_agent(&mut self, seat: Turn, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    /// Send an action intent to a participant's agent, if any.
    pub fn receive(&mut self, seat: Turn, action: Action) -> bool {
        match &mut self.seats[seat.index()] {
            Some(agent) => agent.receive(action),
            None => false,
        }
    }

    /// Pause before a stalled participant is skipped.
    pub fn set_stall_delay_ms(&mut self, delay_ms: u64) {
        self.stall_delay = Duration::from_millis(delay_ms);
    }

    /// Advance the game by at most one step. Returns whether anything changed.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        if engine.phase() != Phase::Playing {
            self.skip_at = None;
            return Ok(false);
        }
        let now = Instant::now();
        if engine.is_stalled() {
            match self.skip_at {
                None if self.stall_delay > Duration::ZERO => {
                    self.skip_at = Some(now + self.stall_delay);
                    return Ok(false);
                }
                Some(at) if now < at => return Ok(false),
                _ => {}
            }
            self.skip_at = None;
            let skipped = engine.skip_if_stalled();
            if skipped {
                debug!(next = %engine.turn(), "stall skip applied");
            }
            return Ok(skipped);
        }
        self.skip_at = None;

        let seat = engine.turn();
        match &mut self.seats[seat.index()] {
            Some(agent) => agent.on_turn(engine, seat),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::game::{Game, GameState};
    use std::thread;

    fn table(player: &str, opponent: &str, deck: &str, turn: Turn) -> Game {
        let state = GameState::arrange(
            parse_cards(deck).unwrap(),
            "5c".parse().unwrap(),
            parse_cards(player).unwrap(),
            parse_cards(opponent).unwrap(),
            turn,
            Suit::Clubs,
        )
        .unwrap();
        Game::resume(GameConfig::default().with_seed(1), state)
    }

    #[test]
    fn human_action_applies_on_its_turn() {
        let mut g = table("3c Kd", "9h 4d", "2s", Turn::Player);
        let mut t = AgentTable::human_vs_bot(&GameConfig::default().without_delays());
        let three = "3c".parse::<crate::cards::Card>().unwrap().id();
        assert!(t.receive(Turn::Player, Action::Play { card: three, declared: None }));
        assert!(!t.receive(Turn::Player, Action::Draw), "one pending action at a time");
        assert!(t.on_turn(&mut g).unwrap());
        assert_eq!(g.state().turn(), Turn::Opponent);
    }

    #[test]
    fn stall_skip_waits_for_delay() {
        let mut g = table("9h", "4d", "", Turn::Player);
        let mut t = AgentTable::new();
        t.set_stall_delay_ms(15);
        assert!(!t.on_turn(&mut g).unwrap());
        assert_eq!(g.state().turn(), Turn::Player);
        thread::sleep(Duration::from_millis(20));
        assert!(t.on_turn(&mut g).unwrap());
        assert_eq!(g.state().turn(), Turn::Opponent);
    }

    #[test]
    fn bot_plays_without_delay() {
        let mut g = table("9h Kd", "3c 4d", "2s", Turn::Opponent);
        let mut t = AgentTable::human_vs_bot(&GameConfig::default().with_seed(2).without_delays());
        assert!(t.on_turn(&mut g).unwrap());
        assert_eq!(g.state().turn(), Turn::Player);
        assert_eq!(g.state().opponent_hand().len(), 1);
    }

    #[test]
    fn debug_shows_agent_kinds() {
        let t = AgentTable::human_vs_bot(&GameConfig::default());
        assert_eq!(format!("{t:?}"), "AgentTable(HB)");
        let mut empty = AgentTable::new();
        empty.set_agent(Turn::Opponent, Some(Box::new(HumanAgent::new())));
        assert_eq!(format!("{empty:?}"), "AgentTable(-H)");
    }
}
