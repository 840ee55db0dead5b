use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Column, Record};
use crate::tui::app::{App, Cursor, DragState, Mode};
use crate::util::unicode::{display_width, fit_to_width};

/// Rows taken by a column header and its rule
const HEADER_HEIGHT: u16 = 2;
/// Rows per card: title and subtitle
const CARD_HEIGHT: u16 = 2;
/// Cells between columns
const COLUMN_GAP: u16 = 1;

/// What occupies a vertical slot in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Card(usize),
    /// Where the dragged card would land
    DropMarker,
}

impl Slot {
    fn height(self) -> u16 {
        match self {
            Slot::Card(_) => CARD_HEIGHT,
            Slot::DropMarker => 1,
        }
    }
}

/// Render the board: one fixed-width column per status, scrolled so the focused
/// column is on screen.
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let columns = app.board.columns();

    if columns.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            " No columns configured for this dashboard",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(msg, area);
        return;
    }

    let col_w = app.board.column_width().min(area.width.max(1));
    let visible = ((area.width + COLUMN_GAP) / (col_w + COLUMN_GAP)).max(1) as usize;

    let drag = match app.mode {
        Mode::Drag(drag) => Some(drag),
        Mode::Navigate => None,
    };
    let focus = drag.map_or(app.cursor, |d| d.target);

    // Horizontal scroll
    if focus.column < app.column_offset {
        app.column_offset = focus.column;
    } else if focus.column >= app.column_offset + visible {
        app.column_offset = focus.column + 1 - visible;
    }
    app.column_offset = app.column_offset.min(columns.len().saturating_sub(visible));

    let mut column_rects = Vec::new();
    let mut card_rects = Vec::new();
    for (k, index) in (app.column_offset..columns.len()).take(visible).enumerate() {
        let x = area.x + k as u16 * (col_w + COLUMN_GAP);
        let width = col_w.min(area.x + area.width - x);
        let rect = Rect::new(x, area.y, width, area.height);
        column_rects.push((index, rect));

        let column = &columns[index];
        let slots = column_slots(column.items.len(), index, drag);
        let focus_row = (focus.column == index).then_some(focus.row);
        let (lines, cards) = render_column_lines(app, column, index, &slots, focus_row, drag, rect);
        card_rects.extend(cards);
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), rect);
    }

    app.hit_map.columns = column_rects;
    app.hit_map.cards = card_rects;
}

/// Order of cards in a column, with the drop marker spliced in while dragging
fn column_slots(len: usize, index: usize, drag: Option<DragState>) -> Vec<Slot> {
    let mut slots: Vec<Slot> = (0..len).map(Slot::Card).collect();
    let Some(drag) = drag else {
        return slots;
    };
    if drag.target.column != index {
        return slots;
    }
    let at = if drag.source.column == index {
        // The target is the final position, so moving down lands after that card
        if drag.target.row == drag.source.row {
            return slots;
        }
        if drag.target.row > drag.source.row {
            drag.target.row + 1
        } else {
            drag.target.row
        }
    } else {
        drag.target.row
    };
    slots.insert(at.min(slots.len()), Slot::DropMarker);
    slots
}

fn render_column_lines<'a>(
    app: &App,
    column: &Column<Record>,
    index: usize,
    slots: &[Slot],
    focus_row: Option<usize>,
    drag: Option<DragState>,
    rect: Rect,
) -> (Vec<Line<'a>>, Vec<(Cursor, Rect)>) {
    let bg = app.theme.background;
    let width = rect.width as usize;
    let accent = app.theme.accent(app.board.header_color(column));
    let mut lines: Vec<Line> = Vec::new();

    // Header: name left, count right, accent rule below
    let count = column.items.len().to_string();
    let name_w = width.saturating_sub(display_width(&count) + 1);
    lines.push(Line::from(vec![
        Span::styled(
            fit_to_width(&column.name, name_w),
            Style::default()
                .fg(accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)),
    ]));
    lines.push(Line::from(Span::styled(
        "\u{2501}".repeat(width),
        Style::default().fg(accent).bg(bg),
    )));

    if column.items.is_empty() && !slots.contains(&Slot::DropMarker) {
        lines.push(Line::from(Span::styled(
            fit_to_width(" (empty)", width),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        return (lines, Vec::new());
    }

    // Vertical scroll: keep the focused slot inside the body
    let body_h = rect.height.saturating_sub(HEADER_HEIGHT);
    let focus_slot = focus_row.and_then(|row| {
        if drag.is_some_and(|d| d.target.column == index) {
            slots.iter().position(|s| *s == Slot::DropMarker)
        } else {
            slots.iter().position(|s| *s == Slot::Card(row))
        }
    });
    let first = first_visible_slot(slots, focus_slot, body_h);

    let mut cards = Vec::new();
    let mut y = rect.y + HEADER_HEIGHT;
    for slot in &slots[first..] {
        if y + slot.height() > rect.y + rect.height {
            break;
        }
        match *slot {
            Slot::DropMarker => {
                lines.push(Line::from(Span::styled(
                    drop_marker(width),
                    Style::default()
                        .fg(app.theme.highlight)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            Slot::Card(row) => {
                let record = &column.items[row];
                let is_dragged =
                    drag.is_some_and(|d| d.source.column == index && d.source.row == row);
                let is_focused = drag.is_none() && focus_row == Some(row);
                lines.extend(card_lines(app, record, width, is_focused, is_dragged));
                cards.push((
                    Cursor { column: index, row },
                    Rect::new(rect.x, y, rect.width, CARD_HEIGHT),
                ));
            }
        }
        y += slot.height();
    }

    (lines, cards)
}

/// First slot to draw so that `focus` fits in `body_h` rows
fn first_visible_slot(slots: &[Slot], focus: Option<usize>, body_h: u16) -> usize {
    let Some(focus) = focus else {
        return 0;
    };
    let mut first = focus;
    let mut used = slots[focus].height();
    while first > 0 && used + slots[first - 1].height() <= body_h {
        first -= 1;
        used += slots[first].height();
    }
    first
}

fn drop_marker(width: usize) -> String {
    let label = " drop here ";
    let label_w = display_width(label);
    if width < label_w + 2 {
        return "\u{2500}".repeat(width);
    }
    let left = (width - label_w) / 2;
    let right = width - label_w - left;
    format!("{}{}{}", "\u{2500}".repeat(left), label, "\u{2500}".repeat(right))
}

fn card_lines<'a>(
    app: &App,
    record: &Record,
    width: usize,
    is_focused: bool,
    is_dragged: bool,
) -> [Line<'a>; 2] {
    let theme = &app.theme;
    let card_bg = if is_focused {
        theme.selection_bg
    } else {
        theme.background
    };
    let (bar_color, title_color) = if is_dragged {
        (theme.highlight, theme.dim)
    } else if is_focused {
        (theme.selection_border, theme.text_bright)
    } else {
        (theme.dim, theme.text)
    };
    let bar = Span::styled("\u{258E}", Style::default().fg(bar_color).bg(card_bg));
    let inner = width.saturating_sub(1);

    let title = format!("#{} {}", record.id, record.title);
    let mut title_style = Style::default().fg(title_color).bg(card_bg);
    if is_focused {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let subtitle = format!(" {}", record.subtitle().unwrap_or(""));

    [
        Line::from(vec![bar.clone(), Span::styled(fit_to_width(&title, inner), title_style)]),
        Line::from(vec![
            bar,
            Span::styled(
                fit_to_width(&subtitle, inner),
                Style::default().fg(theme.dim).bg(card_bg),
            ),
        ]),
    ]
}
