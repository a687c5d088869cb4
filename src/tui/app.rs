use std::cell::Cell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::io::settings_io::resolve_tasks_path;
use crate::io::task_store::JsonTaskStore;
use crate::io::watcher::TasksWatcher;
use crate::model::{Settings, Surface, TaskList, TaskStore};

use super::input;
use super::prompt::Prompt;
use super::render;
use super::render::backdrop::Backdrop;
use super::theme::Theme;

/// Longest the loop sleeps when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Bottom prompt appends tasks until dismissed
    Add,
    /// Bottom prompt replaces the selected task's text
    Edit,
    /// Waiting for y/n before clearing every task
    ConfirmClear,
    ContextMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Edit,
    Delete,
    ClearAll,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Edit, MenuItem::Delete, MenuItem::ClearAll];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Edit => "Edit",
            MenuItem::Delete => "Delete",
            MenuItem::ClearAll => "Clear all",
        }
    }
}

/// Right-click menu, anchored at the click position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenu {
    pub column: u16,
    pub row: u16,
    pub cursor: usize,
}

impl ContextMenu {
    pub fn current(&self) -> MenuItem {
        MenuItem::ALL[self.cursor.min(MenuItem::ALL.len() - 1)]
    }
}

/// Full-repaint request from the task list. Cloned into the list; the event
/// loop takes the flag before each draw.
#[derive(Debug, Clone, Default)]
pub struct ScreenSurface(Rc<Cell<bool>>);

impl ScreenSurface {
    /// Read and reset the pending flag.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.0.get()
    }
}

impl Surface for ScreenSurface {
    fn invalidate(&self) {
        self.0.set(true);
    }
}

/// Main application state
pub struct App {
    pub list: TaskList,
    pub mode: Mode,
    pub prompt: Prompt,
    pub menu: Option<ContextMenu>,
    pub theme: Theme,
    pub backdrop: Option<Backdrop>,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// One-shot status message, cleared by the next key
    pub message: Option<String>,
    /// Selection as last reported by the list's subscriber
    pub selection: Rc<Cell<Option<usize>>>,
    /// Where the list was last drawn, in screen coordinates
    pub list_area: Rect,
    /// Where the context menu was last drawn
    pub menu_area: Option<Rect>,
    pub surface: ScreenSurface,
    /// The tasks file changed on disk and has not been re-read yet
    pub pending_reload: bool,
    reload_source: Option<JsonTaskStore>,
}

impl App {
    pub fn new(store: impl TaskStore + 'static, settings: &Settings) -> Self {
        let surface = ScreenSurface::default();
        let mut list = TaskList::new(settings.list.metrics())
            .with_store(store)
            .with_surface(surface.clone());
        list.load_from_store();

        let selection = Rc::new(Cell::new(list.selected()));
        let mirror = Rc::clone(&selection);
        list.on_selection_changed(move |selected| mirror.set(selected));

        let backdrop = settings.ui.background.as_deref().and_then(Backdrop::load);

        App {
            list,
            mode: Mode::Navigate,
            prompt: Prompt::new(),
            menu: None,
            theme: Theme::from_config(&settings.ui),
            backdrop,
            show_help: false,
            show_key_hints: settings.ui.show_key_hints,
            should_quit: false,
            message: None,
            selection,
            list_area: Rect::default(),
            menu_area: None,
            surface,
            pending_reload: false,
            reload_source: None,
        }
    }

    /// Re-read `source` when the tasks file changes on disk.
    pub fn watch_source(mut self, source: JsonTaskStore) -> Self {
        self.reload_source = Some(source);
        self
    }

    /// Whether a prompt, menu or drag would be disturbed by swapping the list.
    pub fn is_busy(&self) -> bool {
        self.mode != Mode::Navigate || self.list.is_dragging()
    }

    /// Apply a pending on-disk change once nothing is in flight.
    pub fn apply_pending_reload(&mut self) {
        if !self.pending_reload || self.is_busy() {
            return;
        }
        self.pending_reload = false;
        let Some(source) = &self.reload_source else {
            return;
        };
        match source.read() {
            Ok(tasks) if tasks.as_slice() != self.list.tasks() => {
                info!(count = tasks.len(), "tasks file changed on disk, reloading");
                self.list.replace_all(tasks);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not reload tasks file"),
        }
    }

    /// Overlays cover the list, so closing one needs a full repaint.
    pub fn request_repaint(&self) {
        self.surface.invalidate();
    }

    pub fn open_menu(&mut self, column: u16, row: u16) {
        self.menu = Some(ContextMenu {
            column,
            row,
            cursor: 0,
        });
        self.mode = Mode::ContextMenu;
    }

    pub fn close_menu(&mut self) {
        if self.menu.take().is_some() {
            self.request_repaint();
        }
        self.menu_area = None;
        if self.mode == Mode::ContextMenu {
            self.mode = Mode::Navigate;
        }
    }

    pub fn begin_add(&mut self) {
        self.prompt.clear();
        self.mode = Mode::Add;
    }

    /// Open the edit prompt for the selected task. No-op without a selection.
    pub fn begin_edit(&mut self) {
        if let Some(text) = self.list.selected_text() {
            self.prompt = Prompt::with_text(text);
            self.mode = Mode::Edit;
        }
    }

    pub fn begin_clear(&mut self) {
        if self.list.is_empty() {
            self.message = Some("nothing to clear".into());
        } else {
            self.mode = Mode::ConfirmClear;
        }
    }

    pub fn delete_selected(&mut self) {
        match self.list.remove_selected() {
            Some(text) => self.message = Some(format!("deleted: {}", text)),
            None => self.message = Some("no task selected".into()),
        }
    }

    /// Run a context-menu entry and close the menu.
    pub fn activate(&mut self, item: MenuItem) {
        self.close_menu();
        match item {
            MenuItem::Edit => self.begin_edit(),
            MenuItem::Delete => self.delete_selected(),
            MenuItem::ClearAll => self.begin_clear(),
        }
    }
}

/// How long to wait for input before the next auto-scroll step is due.
pub fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline
        .map_or(IDLE_POLL, |d| d.saturating_duration_since(now))
        .min(IDLE_POLL)
}

/// Run the TUI application
pub fn run(
    tasks_override: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks_path = resolve_tasks_path(tasks_override, settings);
    info!(path = %tasks_path.display(), "starting");

    // The watcher needs the directory to exist before the first save
    if let Some(parent) = tasks_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %parent.display(), error = %e, "could not create tasks directory");
    }

    let store = JsonTaskStore::new(&tasks_path);
    let watcher = match TasksWatcher::start(&tasks_path) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "not watching tasks file for outside changes");
            None
        }
    };

    let mut app = App::new(store.clone(), settings).watch_source(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    app.list.focus_gained();
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&TasksWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirty = true;
    loop {
        let repaint = app.list.take_needs_paint();
        if app.surface.take() {
            terminal.clear()?;
            dirty = true;
        }
        if dirty || repaint {
            terminal.draw(|frame| render::render(frame, app))?;
            dirty = false;
        }

        let timeout = poll_timeout(app.list.next_deadline(), Instant::now());
        if event::poll(timeout)? {
            // Drain everything queued so one draw covers the whole burst
            loop {
                handle_event(app, event::read()?);
                dirty = true;
                if app.should_quit || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        app.list.tick(Instant::now());

        if watcher.is_some_and(TasksWatcher::changed) {
            app.pending_reload = true;
        }
        app.apply_pending_reload();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
        Event::Mouse(mouse) => input::handle_mouse(app, mouse, Instant::now()),
        Event::FocusGained => app.list.focus_gained(),
        Event::FocusLost => app.list.focus_lost(),
        Event::Resize(..) => app.surface.invalidate(),
        _ => {}
    }
}
