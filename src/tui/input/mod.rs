mod confirm;
mod menu;
mod mouse;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use menu::handle_menu_key;
use navigate::handle_navigate;
use prompt::{handle_add, handle_edit};

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // The list owns input until the button comes up
    if app.list.is_dragging() {
        return;
    }
    app.message = None;

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        app.request_repaint();
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::ConfirmClear => handle_confirm(app, key),
        Mode::ContextMenu => handle_menu_key(app, key),
    }
}

/// Fold Shift into the character so bindings can match on `'K'` alone.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
