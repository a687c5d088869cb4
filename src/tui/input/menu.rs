use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, MenuItem};

pub(super) fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let Some(menu) = app.menu.as_mut() else {
        app.close_menu();
        return;
    };
    let last = MenuItem::ALL.len() - 1;
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => {
            menu.cursor = menu.cursor.saturating_sub(1);
        }
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => {
            menu.cursor = (menu.cursor + 1).min(last);
        }
        (KeyModifiers::NONE, KeyCode::Enter) => {
            let item = menu.current();
            app.activate(item);
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.activate(MenuItem::Edit),
        (KeyModifiers::NONE, KeyCode::Char('d')) => app.activate(MenuItem::Delete),
        (KeyModifiers::NONE, KeyCode::Char('C')) => app.activate(MenuItem::ClearAll),
        (_, KeyCode::Esc) => app.close_menu(),
        _ => {}
    }
}
