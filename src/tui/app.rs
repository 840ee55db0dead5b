use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::board::{BoardEvent, DropEvent, DropOutcome, KanbanBoard, MoveEvent};
use crate::io::project_io::{discover_project, load_project};
use crate::io::record_store::{self, StoreError};
use crate::io::watcher::BoardWatcher;
use crate::model::{BoardItem, DashboardConfig, Project, Record};
use crate::ops::board_ops::{locate_item, total_items};
use crate::ops::columns::build_columns;

use super::input;
use super::render;
use super::theme::Theme;

/// Longest the event loop sleeps without a timer due
const IDLE_POLL: Duration = Duration::from_millis(250);
/// File events this soon after our own write are our own echo
const SAVE_ECHO_WINDOW: Duration = Duration::from_secs(1);

/// A position on the board: column index and card index within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub column: usize,
    pub row: usize,
}

/// A card picked up and not yet dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub source: Cursor,
    /// Column and insertion index the card would land at
    pub target: Cursor,
    pub via_mouse: bool,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Drag(DragState),
}

/// Left button pressed, not yet released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MousePress {
    pub x: u16,
    pub y: u16,
    pub card: Option<Cursor>,
}

/// Screen regions from the last frame, for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub tabs: Vec<(usize, Rect)>,
    pub columns: Vec<(usize, Rect)>,
    pub cards: Vec<(Cursor, Rect)>,
    pub toast_undo: Option<Rect>,
}

fn contains(rect: &Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

impl HitMap {
    pub fn tab_at(&self, x: u16, y: u16) -> Option<usize> {
        self.tabs
            .iter()
            .find(|(_, r)| contains(r, x, y))
            .map(|(i, _)| *i)
    }

    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, r)| contains(r, x, y))
            .map(|(i, _)| *i)
    }

    pub fn card_at(&self, x: u16, y: u16) -> Option<Cursor> {
        self.cards
            .iter()
            .find(|(_, r)| contains(r, x, y))
            .map(|(c, _)| *c)
    }

    pub fn on_toast_undo(&self, x: u16, y: u16) -> bool {
        self.toast_undo.as_ref().is_some_and(|r| contains(r, x, y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub project: Project,
    pub theme: Theme,
    /// Index of the dashboard on screen
    pub active: usize,
    pub board: KanbanBoard<Record>,
    /// Records of the active dashboard whose status has no column
    pub orphans: usize,
    /// Records per dashboard, for the tab bar
    pub tab_counts: Vec<usize>,
    pub cursor: Cursor,
    /// Saved cursors of dashboards not on screen, by dashboard id
    pub cursors: HashMap<String, Cursor>,
    /// First column drawn when the board is wider than the screen
    pub column_offset: usize,
    pub mode: Mode,
    pub mouse_press: Option<MousePress>,
    /// Record shown in the detail popup
    pub detail: Option<Record>,
    pub status: Option<StatusMessage>,
    pub hit_map: HitMap,
    pub should_quit: bool,
    pub last_save_at: Option<Instant>,
    /// An external change arrived while a move was pending
    pub reload_deferred: bool,
}

impl App {
    pub fn new(project: Project) -> Self {
        let theme = Theme::from_config(&project.config.ui);
        let tab_counts = vec![0; project.config.dashboards.len()];
        let mut app = App {
            board: KanbanBoard::new(Vec::new(), Default::default()),
            project,
            theme,
            active: 0,
            orphans: 0,
            tab_counts,
            cursor: Cursor::default(),
            cursors: HashMap::new(),
            column_offset: 0,
            mode: Mode::Navigate,
            mouse_press: None,
            detail: None,
            status: None,
            hit_map: HitMap::default(),
            should_quit: false,
            last_save_at: None,
            reload_deferred: false,
        };
        app.refresh_all_counts();
        app.load_active();
        app
    }

    pub fn dashboard(&self) -> Option<&DashboardConfig> {
        self.project.config.dashboards.get(self.active)
    }

    pub fn dashboard_id(&self) -> Option<String> {
        self.dashboard().map(|d| d.id.clone())
    }

    fn load_records(&self, dashboard: &DashboardConfig) -> Result<Vec<Record>, StoreError> {
        record_store::load_records(&self.project.records_path(dashboard))
    }

    /// Build the board for the active dashboard from disk
    fn load_active(&mut self) {
        let Some(dashboard) = self.dashboard().cloned() else {
            self.board = KanbanBoard::new(Vec::new(), self.project.config.board.clone());
            return;
        };
        let config = self.project.config.board_config_for(&dashboard);
        let records = match self.load_records(&dashboard) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(dashboard = %dashboard.id, error = %e, "could not load records");
                self.set_error(e.to_string());
                Vec::new()
            }
        };
        let built = build_columns(&dashboard, records);
        self.orphans = built.orphans.len();
        self.board = KanbanBoard::new(built.columns, config);
        self.cursor = self.cursors.get(&dashboard.id).copied().unwrap_or_default();
        self.column_offset = 0;
        self.clamp_cursor();
        self.refresh_count();
    }

    /// Re-read every dashboard's records for the tab bar
    pub fn refresh_all_counts(&mut self) {
        let dashboards = self.project.config.dashboards.clone();
        self.tab_counts = dashboards
            .iter()
            .map(|d| self.load_records(d).map(|r| r.len()).unwrap_or(0))
            .collect();
    }

    /// Recount the active dashboard from what is on screen
    pub fn refresh_count(&mut self) {
        let count = total_items(self.board.columns()) + self.orphans;
        if let Some(slot) = self.tab_counts.get_mut(self.active) {
            *slot = count;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn clamp_cursor(&mut self) {
        let columns = self.board.columns();
        if columns.is_empty() {
            self.cursor = Cursor::default();
            return;
        }
        self.cursor.column = self.cursor.column.min(columns.len() - 1);
        let len = columns[self.cursor.column].items.len();
        self.cursor.row = self.cursor.row.min(len.saturating_sub(1));
    }

    pub fn focused_item(&self) -> Option<&Record> {
        self.board
            .columns()
            .get(self.cursor.column)
            .and_then(|c| c.items.get(self.cursor.row))
    }

    pub fn move_cursor(&mut self, d_column: isize, d_row: isize) {
        let columns = self.board.columns().len();
        if columns == 0 {
            return;
        }
        let column = self.cursor.column.saturating_add_signed(d_column).min(columns - 1);
        if column != self.cursor.column {
            self.cursor.column = column;
        }
        self.cursor.row = self.cursor.row.saturating_add_signed(d_row);
        self.clamp_cursor();
    }

    // -----------------------------------------------------------------------
    // Dashboards
    // -----------------------------------------------------------------------

    /// Show another dashboard. A pending move on the current one is committed first.
    pub fn switch_dashboard(&mut self, index: usize, now: Instant) {
        if index == self.active || index >= self.project.config.dashboards.len() {
            return;
        }
        self.board.commit_pending();
        self.process_events(now);
        self.mode = Mode::Navigate;
        if let Some(id) = self.dashboard_id() {
            self.cursors.insert(id, self.cursor);
        }
        self.board.teardown();
        self.active = index;
        self.load_active();
        tracing::debug!(dashboard = ?self.dashboard_id(), "switched dashboard");
    }

    pub fn next_dashboard(&mut self, now: Instant) {
        let n = self.project.config.dashboards.len();
        if n > 0 {
            self.switch_dashboard((self.active + 1) % n, now);
        }
    }

    pub fn prev_dashboard(&mut self, now: Instant) {
        let n = self.project.config.dashboards.len();
        if n > 0 {
            self.switch_dashboard((self.active + n - 1) % n, now);
        }
    }

    /// Re-read project.toml and the active dashboard's records. Deferred while
    /// a move is pending so the optimistic state stays on screen.
    pub fn reload(&mut self) {
        if self.board.pending().is_some() {
            self.reload_deferred = true;
            return;
        }
        self.reload_deferred = false;

        match load_project(&self.project.root) {
            Ok(project) => {
                let active_id = self.dashboard_id();
                self.theme = Theme::from_config(&project.config.ui);
                self.project = project;
                self.active = active_id
                    .and_then(|id| {
                        self.project
                            .config
                            .dashboards
                            .iter()
                            .position(|d| d.id == id)
                    })
                    .unwrap_or(0);
            }
            Err(e) => {
                tracing::warn!(error = %e, "project.toml reload failed, keeping previous config");
                self.set_error(format!("project.toml: {}", e));
            }
        }

        let Some(dashboard) = self.dashboard().cloned() else {
            self.board.set_columns(Vec::new());
            return;
        };
        match self.load_records(&dashboard) {
            Ok(records) => {
                let built = build_columns(&dashboard, records);
                self.orphans = built.orphans.len();
                self.board.set_columns(built.columns);
                self.board
                    .set_config(self.project.config.board_config_for(&dashboard));
            }
            Err(e) => {
                tracing::error!(dashboard = %dashboard.id, error = %e, "reload failed");
                self.set_error(e.to_string());
            }
        }
        if let Mode::Drag(_) = self.mode {
            self.mode = Mode::Navigate;
        }
        self.clamp_cursor();
        self.refresh_all_counts();
    }

    /// Files under boards/ changed on disk
    pub fn on_files_changed(&mut self, now: Instant) {
        if self
            .last_save_at
            .is_some_and(|t| now.saturating_duration_since(t) < SAVE_ECHO_WINDOW)
        {
            return;
        }
        tracing::debug!("external change detected, reloading");
        self.reload();
    }

    // -----------------------------------------------------------------------
    // Board interaction
    // -----------------------------------------------------------------------

    /// Pick up the focused card
    pub fn start_drag(&mut self, via_mouse: bool) -> bool {
        if self.focused_item().is_none() {
            return false;
        }
        self.mode = Mode::Drag(DragState {
            source: self.cursor,
            target: self.cursor,
            via_mouse,
        });
        true
    }

    pub fn cancel_drag(&mut self) {
        if let Mode::Drag(drag) = self.mode {
            self.cursor = drag.source;
        }
        self.mode = Mode::Navigate;
    }

    /// Largest insertion index in `column` while dragging from `source`
    fn max_target_row(&self, source: Cursor, column: usize) -> usize {
        let len = self
            .board
            .columns()
            .get(column)
            .map_or(0, |c| c.items.len());
        if column == source.column {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    /// Point the drop target at a column and insertion index
    pub fn set_drag_target(&mut self, column: usize, row: usize) {
        let Mode::Drag(mut drag) = self.mode else {
            return;
        };
        let columns = self.board.columns().len();
        if columns == 0 {
            return;
        }
        let column = column.min(columns - 1);
        drag.target = Cursor {
            column,
            row: row.min(self.max_target_row(drag.source, column)),
        };
        self.cursor.column = column;
        self.mode = Mode::Drag(drag);
    }

    pub fn move_drag_target(&mut self, d_column: isize, d_row: isize) {
        let Mode::Drag(drag) = self.mode else {
            return;
        };
        let column = drag.target.column.saturating_add_signed(d_column);
        let row = if d_column != 0 {
            // Keep the same height when hopping columns
            drag.target.row
        } else {
            drag.target.row.saturating_add_signed(d_row)
        };
        self.set_drag_target(column, row);
    }

    /// Drop the dragged card at the current target
    pub fn drop_drag(&mut self, now: Instant) {
        let Mode::Drag(drag) = self.mode else {
            return;
        };
        self.mode = Mode::Navigate;

        let columns = self.board.columns();
        let (Some(source), Some(dest)) = (
            columns.get(drag.source.column),
            columns.get(drag.target.column),
        ) else {
            return;
        };
        let Some(item_id) = source.items.get(drag.source.row).map(|r| r.id()) else {
            return;
        };
        let drop = DropEvent::new(
            source.id.clone(),
            drag.source.row,
            dest.id.clone(),
            drag.target.row,
        );

        match self.board.on_drop(drop, now) {
            Ok(DropOutcome::Ignored) => {
                self.cursor = drag.source;
                self.set_status("Reordering is turned off for this board");
            }
            Ok(_) => {
                if let Some((column, row)) = locate_item(self.board.columns(), &item_id) {
                    self.cursor = Cursor { column, row };
                }
                self.status = None;
            }
            Err(e) => {
                self.cursor = drag.source;
                self.set_error(e.to_string());
            }
        }
        self.process_events(now);
    }

    /// Undo the pending move from the keyboard
    pub fn undo(&mut self, now: Instant) {
        if !self.board.undo() {
            self.set_status("Nothing to undo");
        }
        self.process_events(now);
    }

    /// The toast's undo button
    pub fn press_toast_undo(&mut self, now: Instant) {
        self.board.press_undo();
        self.process_events(now);
    }

    /// Activate the card under the cursor: report the click and open its detail
    pub fn open_focused(&mut self, now: Instant) {
        let Some(column_id) = self.board.columns().get(self.cursor.column).map(|c| c.id.clone())
        else {
            return;
        };
        self.board.click_item(&column_id, self.cursor.row);
        self.process_events(now);
    }

    /// Advance timers and apply whatever they produced
    pub fn tick(&mut self, now: Instant) {
        self.board.poll(now);
        self.process_events(now);
        if self.reload_deferred && self.board.pending().is_none() {
            self.reload();
        }
    }

    /// How long the event loop may block before the next timer is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.board.next_wake() {
            Some(wake) => wake.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Commit a pending move and stop; called on quit
    pub fn shutdown(&mut self, now: Instant) {
        if self.board.commit_pending() {
            tracing::info!("pending move committed on exit");
        }
        self.process_events(now);
        self.board.teardown();
    }

    pub fn process_events(&mut self, now: Instant) {
        for event in self.board.drain_events() {
            match event {
                BoardEvent::ItemMoved(moved) => self.persist_move(moved, now),
                BoardEvent::ItemClicked(record) => {
                    tracing::debug!(id = %record.id, "card opened");
                    self.detail = Some(record);
                }
                BoardEvent::UndoMove => {
                    self.refresh_count();
                    self.clamp_cursor();
                    self.set_status("Move undone");
                }
            }
        }
    }

    /// Write a committed move to the records file. On failure the dashboard is
    /// reloaded so the screen matches the file again.
    fn persist_move(&mut self, moved: MoveEvent<Record>, now: Instant) {
        let Some(dashboard) = self.dashboard().cloned() else {
            return;
        };
        let path = self.project.records_path(&dashboard);
        match record_store::update_status(
            &self.project.board_dir,
            &path,
            &moved.item.id,
            &moved.to_column_id,
        ) {
            Ok(_) => {
                self.last_save_at = Some(now);
                self.refresh_count();
            }
            Err(e) => {
                tracing::error!(id = %moved.item.id, error = %e, "could not save move");
                self.reload();
                self.set_error(format!("Could not save #{}: {}", moved.item.id, e));
            }
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.project.board_dir) else {
        return;
    };

    for (id, saved) in &ui_state.dashboards {
        app.cursors.insert(
            id.clone(),
            Cursor {
                column: saved.column,
                row: saved.row,
            },
        );
    }

    let target = app
        .project
        .config
        .dashboards
        .iter()
        .position(|d| d.id == ui_state.active_dashboard);
    match target {
        Some(index) if index != app.active => app.switch_dashboard(index, Instant::now()),
        _ => {
            if let Some(id) = app.dashboard_id()
                && let Some(saved) = app.cursors.get(&id)
            {
                app.cursor = *saved;
                app.clamp_cursor();
            }
        }
    }
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{DashboardUiState, UiState, write_ui_state};

    let mut cursors = app.cursors.clone();
    if let Some(id) = app.dashboard_id() {
        cursors.insert(id, app.cursor);
    }
    let ui_state = UiState {
        active_dashboard: app.dashboard_id().unwrap_or_default(),
        dashboards: cursors
            .into_iter()
            .map(|(id, c)| {
                (
                    id,
                    DashboardUiState {
                        column: c.column,
                        row: c.row,
                    },
                )
            })
            .collect(),
    };

    if let Err(e) = write_ui_state(&app.project.board_dir, &ui_state) {
        tracing::warn!(error = %e, "could not write .state.json");
    }
}

/// Run the TUI application
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match project_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let root = discover_project(&start)?;
    let project = load_project(&root)?;

    if let Err(e) = crate::logging::init_tui_logging(&project.board_dir) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::info!(project = %project.config.project.name, "starting board");

    let mut app = App::new(project);
    restore_ui_state(&mut app);

    let watcher = match BoardWatcher::start(&app.project.board_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable, external edits need a manual reload");
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    app.shutdown(Instant::now());
    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&BoardWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now());
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if let Some(watcher) = watcher
            && !watcher.poll().is_empty()
        {
            app.on_files_changed(Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
