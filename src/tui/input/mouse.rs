use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::model::Point;
use crate::tui::app::{App, MenuItem, Mode};

/// Route a mouse event to the list, translating to list-local cells.
///
/// The left button captures: once pressed, drags and the release go to the
/// list wherever the pointer is.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    if (app.mode != Mode::Navigate || app.show_help) && app.list.is_dragging() {
        app.list.capture_lost();
    }
    match app.mode {
        Mode::ContextMenu => {
            handle_menu_mouse(app, mouse);
            return;
        }
        Mode::Add | Mode::Edit | Mode::ConfirmClear => return,
        Mode::Navigate => {}
    }
    if app.show_help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.show_help = false;
            app.request_repaint();
        }
        return;
    }

    let area = app.list_area;
    let inside = area.contains(Position::new(mouse.column, mouse.row));
    let local = Point::new(
        i32::from(mouse.column) - i32::from(area.x),
        i32::from(mouse.row) - i32::from(area.y),
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => app.list.pointer_down(local),
        MouseEventKind::Drag(MouseButton::Left) => app.list.pointer_move(local, true, now),
        MouseEventKind::Up(MouseButton::Left) => app.list.pointer_up(),
        MouseEventKind::Moved if inside => app.list.pointer_move(local, false, now),
        MouseEventKind::Moved => app.list.pointer_left(),
        MouseEventKind::ScrollDown if inside => {
            app.list.scroll_by(1);
        }
        MouseEventKind::ScrollUp if inside => {
            app.list.scroll_by(-1);
        }
        MouseEventKind::Down(MouseButton::Right) if inside && !app.list.is_dragging() => {
            app.list.pointer_down(local);
            app.list.pointer_up();
            if app.list.selected().is_some() {
                app.open_menu(mouse.column, mouse.row);
            }
        }
        _ => {}
    }
}

fn handle_menu_mouse(app: &mut App, mouse: MouseEvent) {
    let hit = app
        .menu_area
        .and_then(|area| menu_item_at(area, mouse.column, mouse.row));
    match mouse.kind {
        MouseEventKind::Moved => {
            if let (Some(menu), Some(index)) = (app.menu.as_mut(), hit) {
                menu.cursor = index;
            }
        }
        MouseEventKind::Down(_) => match hit {
            Some(index) => app.activate(MenuItem::ALL[index]),
            None => app.close_menu(),
        },
        _ => {}
    }
}

/// Index of the menu entry under a screen cell. Entries sit inside a
/// one-cell border.
pub(crate) fn menu_item_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let index = usize::from(row.checked_sub(area.y + 1)?);
    (index < MenuItem::ALL.len()).then_some(index)
}
