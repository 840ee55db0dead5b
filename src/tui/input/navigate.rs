use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('z') if ctrl => app.undo(now),
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1, 0),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(0, -1),
        KeyCode::Char('g') | KeyCode::Home => {
            app.cursor.row = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor.row = usize::MAX;
            app.clamp_cursor();
        }

        KeyCode::Tab | KeyCode::Char(']') => app.next_dashboard(now),
        KeyCode::BackTab | KeyCode::Char('[') => app.prev_dashboard(now),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.switch_dashboard(index, now);
        }

        KeyCode::Enter => app.open_focused(now),
        KeyCode::Char('m') | KeyCode::Char(' ') => {
            if !app.start_drag(false) {
                app.set_status("Nothing to move here");
            }
        }
        KeyCode::Char('u') => app.undo(now),
        KeyCode::Char('r') => {
            app.reload();
            if app.reload_deferred {
                app.set_status("Reload waits for the pending move");
            } else {
                app.set_status("Reloaded");
            }
        }
        KeyCode::Esc => app.status = None,
        _ => {}
    }
}
