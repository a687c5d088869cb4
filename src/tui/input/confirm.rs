use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// y clears every task; any other key cancels.
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    app.mode = Mode::Navigate;
    if key.modifiers == KeyModifiers::NONE && matches!(key.code, KeyCode::Char('y' | 'Y')) {
        let count = app.list.len();
        app.list.clear();
        app.message = Some(format!("cleared {} tasks", count));
    }
}
