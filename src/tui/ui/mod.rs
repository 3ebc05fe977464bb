mod layout;
mod menu;
mod overlays;
mod table;

use crate::game::Phase;
use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Menu => menu::draw_menu(f, app),
        Scene::Table => {
            table::draw_table(f, app);
            // One overlay at a time, most specific first.
            if let Some(picker) = app.suit_picker() {
                overlays::draw_suit_picker(f, picker);
            } else if app.help_open() {
                overlays::draw_help(f);
            } else if app.history_open() {
                overlays::draw_history(f, app);
            } else if app.game.state().phase() == Phase::GameOver {
                overlays::draw_game_over(f, app);
            }
        }
    }
}
