use crate::cards::Suit;
use crate::game::{HistoryVerb, Turn};
use crate::tui::app::{AppState, SuitPicker};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};
use super::table::{short_card, suit_glyph_and_style};

pub(super) fn draw_suit_picker(f: &mut Frame, picker: SuitPicker) {
    let area = centered_rect(50, 30, f.area());
    let title = format!("Play {}: choose a suit", short_card(picker.card));
    let block = Block::default().title(title).borders(Borders::ALL);
    let mut spans: Vec<Span> = Vec::with_capacity(Suit::ALL.len() * 2);
    for suit in Suit::ALL {
        let (glyph, mut style) = suit_glyph_and_style(suit);
        if suit == picker.suit() {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {glyph} {} ", suit.name()), style));
        spans.push(Span::raw(" "));
    }
    let lines = vec![
        Line::from(""),
        Line::from(spans),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ choose • Enter confirm • H/D/C/S pick • Esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

pub(super) fn draw_game_over(f: &mut Frame, app: &AppState) {
    let area = centered_rect(40, 30, f.area());
    let (headline, color) = match app.game.state().winner() {
        Some(Turn::Player) => ("You win!", Color::Green),
        Some(Turn::Opponent) => ("Opponent wins!", Color::LightRed),
        None => ("Game over", Color::White),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Space: play again • M: menu"),
    ];
    let block = Block::default().title("Game Over").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

pub(super) fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let mut line = format!("{:>3}. {} {}", entry.seq + 1, entry.actor, entry.verb.label());
            if let Some(card) = entry.card {
                line.push(' ');
                line.push_str(&short_card(card));
            }
            if let Some(suit) = entry.declared {
                line.push_str(&format!(" -> {}", suit.name()));
            }
            let style = if entry.verb == HistoryVerb::Win {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(line, style)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

pub(super) fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Match the active suit or the top card's rank"),
        Line::from("- Eights are wild: play one anytime and name the next suit"),
        Line::from("- No playable card? Draw. Empty deck: your turn passes"),
        Line::from("- First to empty their hand wins"),
        Line::from(""),
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / play again"),
        Line::from("- Left / Right, 1-9: select card"),
        Line::from("- Enter: play selected card"),
        Line::from("- D: draw"),
        Line::from("- R: restart"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply (starts a new table)"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
