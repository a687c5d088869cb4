use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Bottom prompt in Add mode. Enter appends and keeps prompting.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            if let Some(text) = app.prompt.submission() {
                let text = text.to_string();
                app.list.append(text);
                app.prompt.clear();
            }
        }
        (_, KeyCode::Esc) => {
            app.prompt.clear();
            app.mode = Mode::Navigate;
        }
        _ => edit_prompt(app, key),
    }
}

/// Bottom prompt in Edit mode. The prompt answers the list's text request.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            app.prompt.confirm();
            finish_edit(app);
        }
        (_, KeyCode::Esc) => {
            app.prompt.cancel();
            finish_edit(app);
        }
        _ => edit_prompt(app, key),
    }
}

fn finish_edit(app: &mut App) {
    app.list.edit_selected(&mut app.prompt);
    app.prompt.clear();
    app.mode = Mode::Navigate;
}

fn edit_prompt(app: &mut App, key: KeyEvent) {
    let prompt = &mut app.prompt;
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            prompt.delete_word()
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => prompt.home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => prompt.end(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => prompt.clear(),
        (_, KeyCode::Backspace) => prompt.backspace(),
        (_, KeyCode::Delete) => prompt.delete(),
        (_, KeyCode::Left) => prompt.left(),
        (_, KeyCode::Right) => prompt.right(),
        (KeyModifiers::NONE, KeyCode::Char(c)) => prompt.insert(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::tests::{press, press_mod, type_str};
    use crate::tui::render::test_helpers::app_with_tasks;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_editing_keys() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "wlk");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.prompt.text(), "walk");
        press_mod(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.prompt.text(), "alk");
        press_mod(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.prompt.text(), "");
    }

    #[test]
    fn blank_edit_keeps_text() {
        let mut app = app_with_tasks(&["A"]);
        app.list.select(0);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.list.tasks(), ["A"]);
    }

    #[test]
    fn uppercase_letters_type_into_prompt() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        press_mod(&mut app, KeyCode::Char('c'), KeyModifiers::SHIFT);
        type_str(&mut app, "all Bob");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list.tasks(), ["Call Bob"]);
        assert_eq!(app.mode, Mode::Add);
    }
}
