use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::NavKey;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if let Some(nav) = nav_key(key) {
        app.list.navigate(nav);
        return;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Insert) => app.begin_add(),
        (KeyModifiers::NONE, KeyCode::Char('e') | KeyCode::F(2) | KeyCode::Enter) => {
            if app.list.selected().is_some() {
                app.begin_edit();
            } else {
                app.message = Some("no task selected".into());
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected(),
        (KeyModifiers::NONE, KeyCode::Char('C')) => app.begin_clear(),
        (KeyModifiers::NONE, KeyCode::Char('?')) => app.show_help = true,
        (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        _ => {}
    }
}

fn nav_key(key: KeyEvent) -> Option<NavKey> {
    let nav = match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => NavKey::Up,
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => NavKey::Down,
        (KeyModifiers::NONE, KeyCode::Home | KeyCode::Char('g')) => NavKey::Home,
        (KeyModifiers::NONE, KeyCode::End | KeyCode::Char('G')) => NavKey::End,
        (KeyModifiers::CONTROL, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('K')) => {
            NavKey::MoveUp
        }
        (KeyModifiers::CONTROL, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('J')) => {
            NavKey::MoveDown
        }
        _ => return None,
    };
    Some(nav)
}
