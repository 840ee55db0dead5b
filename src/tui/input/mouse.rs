use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Mode, MousePress};

/// Manhattan distance in cells before a press becomes a drag
const DRAG_THRESHOLD: u16 = 3;

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => on_press(app, x, y, now),
        MouseEventKind::Drag(MouseButton::Left) => on_drag(app, x, y),
        MouseEventKind::Up(MouseButton::Left) => on_release(app, x, y, now),
        MouseEventKind::ScrollDown if app.mode == Mode::Navigate => app.move_cursor(0, 1),
        MouseEventKind::ScrollUp if app.mode == Mode::Navigate => app.move_cursor(0, -1),
        _ => {}
    }
}

fn on_press(app: &mut App, x: u16, y: u16, now: Instant) {
    if app.detail.is_some() {
        app.detail = None;
        return;
    }
    if app.hit_map.on_toast_undo(x, y) {
        app.press_toast_undo(now);
        return;
    }
    if let Some(tab) = app.hit_map.tab_at(x, y) {
        app.switch_dashboard(tab, now);
        return;
    }
    let card = app.hit_map.card_at(x, y);
    if let Some(cursor) = card {
        app.cursor = cursor;
        app.clamp_cursor();
    }
    app.mouse_press = Some(MousePress { x, y, card });
}

fn on_drag(app: &mut App, x: u16, y: u16) {
    let Some(press) = app.mouse_press else {
        return;
    };
    match app.mode {
        Mode::Navigate => {
            let moved = press.x.abs_diff(x) + press.y.abs_diff(y);
            if press.card.is_some() && moved >= DRAG_THRESHOLD && app.start_drag(true) {
                hover(app, x, y);
            }
        }
        Mode::Drag(drag) if drag.via_mouse => hover(app, x, y),
        Mode::Drag(_) => {}
    }
}

/// Point the drop target at the column under the pointer, before the card
/// under it or at the end when below every card.
fn hover(app: &mut App, x: u16, y: u16) {
    let Some(column) = app.hit_map.column_at(x, y) else {
        return;
    };
    let row = app
        .hit_map
        .cards
        .iter()
        .filter(|(c, _)| c.column == column)
        .find(|(_, r)| y < r.y + r.height)
        .map_or(usize::MAX, |(c, _)| c.row);
    app.set_drag_target(column, row);
}

fn on_release(app: &mut App, x: u16, y: u16, now: Instant) {
    let press = app.mouse_press.take();
    match app.mode {
        Mode::Drag(drag) if drag.via_mouse => {
            hover(app, x, y);
            app.drop_drag(now);
        }
        Mode::Navigate => {
            let Some(pressed) = press.and_then(|p| p.card) else {
                return;
            };
            if app.hit_map.card_at(x, y) == Some(pressed) {
                app.open_focused(now);
            }
        }
        Mode::Drag(_) => {}
    }
}
