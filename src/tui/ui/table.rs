use crate::cards::{Card, Suit};
use crate::game::{GameState, Phase, Turn};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{card_slots, inner};

const CARD_WIDTH: u16 = 7;
const MIN_CARD_WIDTH: u16 = 4;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let st = app.game.state();
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // header
            Constraint::Length(5),             // opponent hand
            Constraint::Length(5),             // deck and discard
            Constraint::Min(5),                // player hand
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    let turn_label = match st.phase() {
        Phase::Playing => match st.turn() {
            Turn::Player => "Your turn",
            Turn::Opponent => "Opponent's turn",
        },
        Phase::GameOver => "Game over",
        _ => "Not dealt",
    };
    let header = Paragraph::new(Line::from(format!(
        "Deck: {}   Discard: {}   {}   {}",
        st.deck_len(),
        st.discard_pile().len(),
        turn_label,
        app.config.draw_rule.label(),
    )))
    .block(Block::default().title("Crazy Eights").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_opponent(f, chunks[1], st);
    draw_pile_row(f, chunks[2], st);
    draw_player_hand(f, chunks[3], app);
    draw_status(f, chunks[4], app);
}

fn draw_opponent(f: &mut Frame, area: Rect, st: &GameState) {
    let n = st.opponent_hand().len();
    let mut block = Block::default().title(format!("Opponent ({n} cards)")).borders(Borders::ALL);
    if st.phase() == Phase::Playing && st.turn() == Turn::Opponent {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let row = inner(area);
    f.render_widget(block, area);
    for slot in card_slots(row, n, CARD_WIDTH, MIN_CARD_WIDTH) {
        render_card_back(f, slot);
    }
}

fn draw_pile_row(f: &mut Frame, area: Rect, st: &GameState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CARD_WIDTH + 4),
            Constraint::Length(CARD_WIDTH + 4),
            Constraint::Min(10),
        ])
        .split(area);

    let deck_block = Block::default().title("Deck").borders(Borders::ALL);
    let deck_inner = inner(cols[0]);
    f.render_widget(deck_block, cols[0]);
    let deck_text =
        if st.deck_len() == 0 { "empty".to_string() } else { st.deck_len().to_string() };
    f.render_widget(Paragraph::new(deck_text).alignment(Alignment::Center), deck_inner);

    let top_block = Block::default().title("Top").borders(Borders::ALL);
    let top_inner = inner(cols[1]);
    f.render_widget(top_block, cols[1]);
    render_card_widget(f, top_inner, st.top_discard(), None);

    let active_line = match st.active_suit() {
        Some(suit) => {
            let (glyph, style) = suit_glyph_and_style(suit);
            let mut spans = vec![
                Span::raw("Active suit: "),
                Span::styled(format!("{glyph} {}", suit.name()), style),
            ];
            if st.top_discard().is_some_and(|c| c.is_wild()) {
                let dim = Style::default().add_modifier(Modifier::DIM);
                spans.push(Span::styled(" (declared)", dim));
            }
            Line::from(spans)
        }
        None => Line::from("Active suit: --"),
    };
    let info = Paragraph::new(vec![Line::from(""), active_line])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(info, cols[2]);
}

fn draw_player_hand(f: &mut Frame, area: Rect, app: &AppState) {
    let st = app.game.state();
    let cards = st.player_hand().as_slice();
    let mut block =
        Block::default().title(format!("Your hand ({})", cards.len())).borders(Borders::ALL);
    if app.can_act() {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let row = inner(area);
    f.render_widget(block, area);
    let your_turn = app.can_act();
    let slots = card_slots(row, cards.len(), CARD_WIDTH, MIN_CARD_WIDTH);
    for (i, slot) in slots.into_iter().enumerate() {
        let card = cards[i];
        let border = if i == app.cursor {
            Some(Color::Yellow)
        } else if your_turn && st.can_play(card) {
            Some(Color::Green)
        } else if your_turn {
            Some(Color::DarkGray)
        } else {
            None
        };
        render_card_widget(f, slot, Some(card), border);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    let st = app.game.state();
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left: Vec<Line> = vec![Line::from(st.last_action().to_string())];
    match st.phase() {
        Phase::Start => left.push(Line::from("Press Space to deal.")),
        Phase::Playing if st.is_deadlocked() => left.push(Line::from(Span::styled(
            "Nobody can move: turns will keep being skipped. R restarts.",
            Style::default().fg(Color::LightRed),
        ))),
        Phase::Playing if st.is_stalled() => {
            left.push(Line::from("No playable card and the deck is empty. Skipping..."))
        }
        Phase::Playing if app.can_act() => {
            let playable = st.playable_cards(Turn::Player).len();
            left.push(Line::from(format!("{playable} playable card(s). Enter play, D draw.")));
        }
        Phase::Playing => left.push(Line::from("Opponent is thinking...")),
        _ => {}
    }
    if let Some(err) = app.action_error() {
        let style = Style::default().fg(Color::Red);
        left.push(Line::from(Span::styled(format!("Error: {err}"), style)));
    }

    let right_keys = vec![
        Line::from("←/→ select • Enter play • D draw"),
        Line::from("R restart • ? help • H history • M menu"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

pub(super) fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

pub(super) fn short_card(c: Card) -> String {
    let (sg, _) = suit_glyph_and_style(c.suit());
    format!("{}{}", c.rank().label(), sg)
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let content = if let Some(c) = card {
        let (_, style) = suit_glyph_and_style(c.suit());
        Line::from(Span::styled(short_card(c), style))
    } else {
        Line::from("[  ]")
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

fn render_card_back(f: &mut Frame, area: Rect) {
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Blue));
    let inner = inner(area);
    f.render_widget(block, area);
    let back = Span::styled("##", Style::default().fg(Color::Blue));
    f.render_widget(Paragraph::new(Line::from(back)).alignment(Alignment::Center), inner);
}
