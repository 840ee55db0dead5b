use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

const TOAST_MAX_W: u16 = 40;
const TOAST_MIN_W: u16 = 24;
const TOAST_H: u16 = 4;
const UNDO_BUTTON: &str = "[u] undo";

/// Render the undo toast in the bottom-right corner of `area`, recording where
/// its undo button landed.
pub fn render_toast(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(view) = app.board.toast() else {
        return;
    };
    if area.width < TOAST_MIN_W + 1 || area.height < TOAST_H {
        return;
    }

    let w = TOAST_MAX_W.min(area.width - 1);
    let rect = Rect::new(
        area.x + area.width - w - 1,
        area.y + area.height - TOAST_H,
        w,
        TOAST_H,
    );
    let inner_w = (w - 2) as usize;

    let bg = app.theme.background;
    let badge = format!("{}s", view.remaining_secs);
    let title_w = inner_w.saturating_sub(badge.len() + 3);
    let button_w = UNDO_BUTTON.len();
    let message_w = inner_w.saturating_sub(button_w + 3);

    let lines = vec![
        Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(
                fit_to_width(&view.title, title_w),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(badge, Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(" ", Style::default().bg(bg)),
        ]),
        Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(
                fit_to_width(&view.message, message_w),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(
                UNDO_BUTTON,
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", Style::default().bg(bg)),
        ]),
    ];

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    app.hit_map.toast_undo = Some(Rect::new(
        rect.x + rect.width - 2 - button_w as u16,
        rect.y + 2,
        button_w as u16,
        1,
    ));
}
