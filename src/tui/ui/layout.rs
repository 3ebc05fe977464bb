use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1]);
    cols[1]
}

/// Split a row into `n` card slots no wider than `max_width`, left aligned.
/// Cards that do not fit get no slot.
pub(super) fn card_slots(area: Rect, n: usize, max_width: u16, min_width: u16) -> Vec<Rect> {
    if n == 0 || area.width < min_width {
        return Vec::new();
    }
    let fit = (area.width / n as u16).clamp(min_width, max_width);
    let shown = n.min((area.width / fit) as usize);
    (0..shown as u16)
        .map(|i| Rect { x: area.x + i * fit, y: area.y, width: fit, height: area.height })
        .collect()
}
