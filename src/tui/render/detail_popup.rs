use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::cli::output::format_record_detail;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::centered_rect_fixed;

/// Render the detail popup for the clicked record
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(record) = app.detail.as_ref() else {
        return;
    };

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let status_name = app.board.column(&record.status).map(|c| c.name.as_str());

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        truncate_to_width(&format!(" #{} {}", record.id, record.title), inner_w),
        header_style,
    )));
    lines.push(Line::from(Span::styled("", text_style)));
    for row in format_record_detail(record, status_name) {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!(" {}", row), inner_w),
            text_style,
        )));
    }
    lines.push(Line::from(Span::styled("", text_style)));
    lines.push(Line::from(Span::styled(" Esc close", dim_style)));

    // Dynamic height from content + 2 for borders
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
