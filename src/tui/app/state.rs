use crate::agents::{Action, AgentTable};
use crate::cards::{Card, Suit};
use crate::config::{DrawRule, GameConfig};
use crate::game::{Game, Intent, Phase, Turn};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    /// Deal from the start screen, or play again after a game ends.
    Deal,
    /// Abandon the current game and deal a fresh one.
    Restart,
    CursorLeft,
    CursorRight,
    CursorTo(usize),
    PlaySelected,
    Draw,
    SuitNext,
    SuitPrev,
    SuitPick(Suit),
    SuitConfirm,
    SuitCancel,
}

/// An Eight waiting for its declared suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitPicker {
    pub card: Card,
    pub index: usize,
}

impl SuitPicker {
    pub fn suit(&self) -> Suit {
        Suit::ALL[self.index % Suit::ALL.len()]
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Core game engine instance
    pub game: Game,
    pub agents: AgentTable,
    pub config: GameConfig,
    // Index into the player's hand
    pub cursor: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_seed: Option<u64>,
    pub cfg_draw_rule: DrawRule,
    pub cfg_opponent_delay_ms: u64,
    pub cfg_stall_delay_ms: u64,
    suit_picker: Option<SuitPicker>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn new(config: GameConfig) -> Self {
        Self {
            scene: Scene::Menu,
            game: Game::new(config.clone()),
            agents: AgentTable::human_vs_bot(&config),
            cursor: 0,
            menu_index: 0,
            cfg_seed: config.seed,
            cfg_draw_rule: config.draw_rule,
            cfg_opponent_delay_ms: config.opponent_delay_ms,
            cfg_stall_delay_ms: config.stall_delay_ms,
            config,
            suit_picker: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        }
    }

    /// The player may submit a move right now.
    pub fn can_act(&self) -> bool {
        let st = self.game.state();
        self.scene == Scene::Table && st.phase() == Phase::Playing && st.turn() == Turn::Player
    }

    /// Card under the cursor, if the hand is not empty.
    pub fn selected_card(&self) -> Option<Card> {
        self.game.state().player_hand().as_slice().get(self.cursor).copied()
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if !self.can_act() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(Turn::Player, action)
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn suit_picker(&self) -> Option<SuitPicker> {
        self.suit_picker
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
        self.suit_picker = None;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::Deal => self.scene == Scene::Table && self.deal(),
            InputAction::Restart => {
                if self.scene != Scene::Table {
                    return false;
                }
                self.restart()
            }
            InputAction::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            InputAction::CursorRight => {
                let len = self.game.state().player_hand().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                false
            }
            InputAction::CursorTo(idx) => {
                if idx < self.game.state().player_hand().len() {
                    self.cursor = idx;
                }
                false
            }
            InputAction::PlaySelected => self.play_selected(),
            InputAction::Draw => self.queue_action(Action::Draw),
            InputAction::SuitNext => {
                if let Some(p) = self.suit_picker.as_mut() {
                    p.index = (p.index + 1) % Suit::ALL.len();
                }
                false
            }
            InputAction::SuitPrev => {
                if let Some(p) = self.suit_picker.as_mut() {
                    p.index = (p.index + Suit::ALL.len() - 1) % Suit::ALL.len();
                }
                false
            }
            InputAction::SuitPick(suit) => {
                if let Some(p) = self.suit_picker.as_mut() {
                    p.index = suit.index();
                    return self.confirm_suit();
                }
                false
            }
            InputAction::SuitConfirm => self.confirm_suit(),
            InputAction::SuitCancel => {
                self.suit_picker = None;
                false
            }
        }
    }

    /// Start from `Start`, or play again once the game is over.
    pub fn deal(&mut self) -> bool {
        match self.game.state().phase() {
            Phase::Start => self.submit(Intent::StartGame),
            Phase::GameOver => self.restart(),
            _ => false,
        }
    }

    pub fn restart(&mut self) -> bool {
        self.close_overlays();
        self.submit(Intent::Reset) && self.submit(Intent::StartGame)
    }

    fn submit(&mut self, intent: Intent) -> bool {
        match self.game.submit(intent) {
            Ok(_) => {
                self.cursor = 0;
                self.history_offset = 0;
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn play_selected(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(card) = self.selected_card() else {
            return false;
        };
        if !self.game.state().can_play(card) {
            self.set_action_error(format!("{card} matches neither suit nor rank"));
            return false;
        }
        if card.is_wild() {
            let index = self.game.state().active_suit().map(|s| s.index()).unwrap_or(0);
            self.suit_picker = Some(SuitPicker { card, index });
            return false;
        }
        self.queue_action(Action::Play { card: card.id(), declared: None })
    }

    fn confirm_suit(&mut self) -> bool {
        let Some(picker) = self.suit_picker.take() else {
            return false;
        };
        self.queue_action(Action::Play { card: picker.card.id(), declared: Some(picker.suit()) })
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
        let len = self.game.state().player_hand().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::game::GameState;

    fn table_app() -> AppState {
        let mut app = AppState::new(GameConfig::default().with_seed(11).without_delays());
        app.apply_menu();
        app
    }

    #[test]
    fn action_ignored_before_deal() {
        let mut app = table_app();
        assert!(!app.handle_input(InputAction::Draw));
        app.agents_on_turn();
        assert_eq!(app.game.state().phase(), Phase::Start);
    }

    #[test]
    fn draw_goes_through_the_agent_table() {
        let mut app = table_app();
        assert!(app.handle_input(InputAction::Deal));
        let before = app.game.state().player_hand().len();
        assert!(app.handle_input(InputAction::Draw));
        app.agents_on_turn();
        assert_eq!(app.game.state().player_hand().len(), before + 1);
    }

    /// Player to act holding `player` on a 5 of Clubs.
    fn app_holding(player: &str) -> AppState {
        let mut app = table_app();
        let state = GameState::arrange(
            parse_cards("2s 3s").unwrap(),
            "5c".parse().unwrap(),
            parse_cards(player).unwrap(),
            parse_cards("9d Qd").unwrap(),
            Turn::Player,
            Suit::Clubs,
        )
        .unwrap();
        app.game = Game::resume(app.config.clone(), state);
        app
    }

    #[test]
    fn eight_opens_the_suit_picker() {
        let mut app = app_holding("Kd 8h 3c");
        let eight: Card = "8h".parse().unwrap();
        app.handle_input(InputAction::CursorTo(1));
        assert!(!app.handle_input(InputAction::PlaySelected));
        let picker = app.suit_picker().unwrap();
        assert_eq!(picker.card, eight);
        assert_eq!(picker.suit(), Suit::Clubs, "starts on the active suit");
        app.handle_input(InputAction::SuitCancel);
        assert!(app.suit_picker().is_none());
        assert_eq!(app.game.state().player_hand().len(), 3);

        assert!(!app.handle_input(InputAction::PlaySelected));
        assert!(app.handle_input(InputAction::SuitPick(Suit::Hearts)));
        assert!(app.suit_picker().is_none());
        app.agents_on_turn();
        let st = app.game.state();
        assert_eq!(st.top_discard(), Some(eight));
        assert_eq!(st.active_suit(), Some(Suit::Hearts));
        assert_eq!(st.turn(), Turn::Opponent);
    }

    #[test]
    fn unplayable_selection_reports_an_error() {
        let mut app = app_holding("Kd 8h 3c");
        app.handle_input(InputAction::CursorTo(0));
        assert!(!app.handle_input(InputAction::PlaySelected));
        assert!(app.action_error().is_some());
        assert!(app.suit_picker().is_none());
    }
}
