pub mod board_view;
pub mod detail_popup;
pub mod status_row;
pub mod tab_bar;
#[cfg(test)]
pub mod test_helpers;
pub mod toast;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, HitMap};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | board | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // board
            Constraint::Length(1), // status row
        ])
        .split(area);

    // Hit regions are rebuilt every frame
    app.hit_map = HitMap::default();

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    board_view::render_board(frame, app, chunks[1]);

    // Undo toast floats over the bottom-right of the board
    toast::render_toast(frame, app, chunks[1]);

    if app.detail.is_some() {
        detail_popup::render_detail_popup(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
