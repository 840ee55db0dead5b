use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// Keys while a card is picked up: arrows pick the target, Enter drops
pub(super) fn handle_drag(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.move_drag_target(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_drag_target(1, 0),
        KeyCode::Char('j') | KeyCode::Down => app.move_drag_target(0, 1),
        KeyCode::Char('k') | KeyCode::Up => app.move_drag_target(0, -1),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => app.drop_drag(now),
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}
