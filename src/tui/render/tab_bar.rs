use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the tab bar: one tab per dashboard with its record count, separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Leading icon
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25A6}",
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    let mut x = spans_width(&spans);
    let mut tab_rects = Vec::new();
    for (i, dashboard) in app.project.config.dashboards.iter().enumerate() {
        let count = app.tab_counts.get(i).copied().unwrap_or(0);
        let label = format!(" {} {} ", dashboard.name, count);
        let width = display_width(&label);
        if x + width > area.width as usize {
            break;
        }
        tab_rects.push((i, Rect::new(area.x + x as u16, area.y, width as u16, 1)));
        spans.push(Span::styled(label, tab_style(app, i == app.active)));
        x += width;
        sep_cols.push(x);
        spans.push(sep.clone());
        x += 1;
    }
    app.hit_map.tabs = tab_rects;

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }

    let project_name = &app.project.config.project.name;
    let label = format!(" {} ", project_name);
    let label_width = display_width(&label);
    let spans = if label_width + 4 < width {
        // Project name at the right end of the rule
        let keep: String = line.chars().take(width - label_width - 1).collect();
        vec![
            Span::styled(keep, Style::default().fg(app.theme.dim).bg(app.theme.background)),
            Span::styled(
                label,
                Style::default().fg(app.theme.text).bg(app.theme.background),
            ),
            Span::styled(
                "\u{2500}",
                Style::default().fg(app.theme.dim).bg(app.theme.background),
            ),
        ]
    } else {
        vec![Span::styled(
            line,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )]
    };

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
