use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Settings, TaskStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 40;
pub const TERM_H: u16 = 10;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Draw the whole app at the given size.
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// In-memory store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub tasks: Rc<RefCell<Vec<String>>>,
}

impl MemoryStore {
    pub fn with(tasks: &[&str]) -> Self {
        MemoryStore {
            tasks: Rc::new(RefCell::new(
                tasks.iter().map(|t| t.to_string()).collect(),
            )),
        }
    }
}

impl TaskStore for MemoryStore {
    fn load(&mut self) -> Vec<String> {
        self.tasks.borrow().clone()
    }

    fn save(&mut self, tasks: &[String]) {
        *self.tasks.borrow_mut() = tasks.to_vec();
    }
}

/// App over an in-memory store holding `tasks`, default settings.
pub fn app_with_tasks(tasks: &[&str]) -> App {
    App::new(MemoryStore::with(tasks), &Settings::default())
}
