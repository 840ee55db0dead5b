use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

const NAVIGATE_HINT: &str = "m move  Enter open  u undo  Tab board  q quit";
const DRAG_HINT: &str = "\u{2190}\u{2192} column  \u{2191}\u{2193} position  Enter drop  Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (left, left_style) = match app.mode {
        Mode::Drag(drag) => {
            let label = match app.board.columns().get(drag.source.column) {
                Some(column) => match column.items.get(drag.source.row) {
                    Some(record) => format!("Moving #{}", record.id),
                    None => "Moving".to_string(),
                },
                None => "Moving".to_string(),
            };
            (label, Style::default().fg(app.theme.highlight).bg(bg))
        }
        Mode::Navigate => match (&app.status, app.orphans) {
            (Some(status), _) => {
                let color = if status.is_error {
                    app.theme.red
                } else {
                    app.theme.text_bright
                };
                (status.text.clone(), Style::default().fg(color).bg(bg))
            }
            (None, 0) => (String::new(), Style::default().bg(bg)),
            (None, n) => (
                format!("{} record(s) not on this board (unknown status or repeated id)", n),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        },
    };

    let hint = match app.mode {
        Mode::Drag(_) => DRAG_HINT,
        Mode::Navigate => NAVIGATE_HINT,
    };

    let mut spans = vec![Span::styled(truncate_to_width(&left, width), left_style)];
    let content_width = display_width(&left).min(width);
    let hint_width = display_width(hint);
    if content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
