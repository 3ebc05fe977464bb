use crate::agents::AgentTable;
use crate::game::Game;

use super::{AppState, Scene};

const DELAY_STEP_MS: u64 = 100;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Seed,
    DrawRule,
    OpponentDelayMs,
    StallDelayMs,
}

const MENU_ITEMS: [MenuItem; 4] =
    [MenuItem::Seed, MenuItem::DrawRule, MenuItem::OpponentDelayMs, MenuItem::StallDelayMs];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: random".to_string(),
            },
            MenuItem::DrawRule => format!("Draw Rule: {}", app.cfg_draw_rule.label()),
            MenuItem::OpponentDelayMs => {
                format!("Opponent Delay (ms): {}", app.cfg_opponent_delay_ms)
            }
            MenuItem::StallDelayMs => format!("Stall Skip Delay (ms): {}", app.cfg_stall_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(0, |s| s.saturating_add(1)));
            }
            MenuItem::DrawRule => app.cfg_draw_rule = app.cfg_draw_rule.toggled(),
            MenuItem::OpponentDelayMs => {
                app.cfg_opponent_delay_ms = app.cfg_opponent_delay_ms.saturating_add(DELAY_STEP_MS);
            }
            MenuItem::StallDelayMs => {
                app.cfg_stall_delay_ms = app.cfg_stall_delay_ms.saturating_add(DELAY_STEP_MS);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            // Below zero wraps back to a random seed.
            MenuItem::Seed => {
                app.cfg_seed = match app.cfg_seed {
                    Some(0) | None => None,
                    Some(s) => Some(s - 1),
                };
            }
            MenuItem::DrawRule => app.cfg_draw_rule = app.cfg_draw_rule.toggled(),
            MenuItem::OpponentDelayMs => {
                app.cfg_opponent_delay_ms = app.cfg_opponent_delay_ms.saturating_sub(DELAY_STEP_MS);
            }
            MenuItem::StallDelayMs => {
                app.cfg_stall_delay_ms = app.cfg_stall_delay_ms.saturating_sub(DELAY_STEP_MS);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        self.cfg_seed = self.config.seed;
        self.cfg_draw_rule = self.config.draw_rule;
        self.cfg_opponent_delay_ms = self.config.opponent_delay_ms;
        self.cfg_stall_delay_ms = self.config.stall_delay_ms;
        self.scene = Scene::Menu;
    }

    /// Replace the game with a fresh one built from the edited settings.
    pub fn apply_menu(&mut self) {
        let mut config = self.config.clone();
        config.seed = self.cfg_seed;
        config.draw_rule = self.cfg_draw_rule;
        config.opponent_delay_ms = self.cfg_opponent_delay_ms;
        config.stall_delay_ms = self.cfg_stall_delay_ms;

        self.game = Game::new(config.clone());
        self.agents = AgentTable::human_vs_bot(&config);
        self.config = config;
        self.cursor = 0;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
