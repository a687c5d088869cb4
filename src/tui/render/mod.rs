pub mod backdrop;
pub mod context_menu;
pub mod help_overlay;
pub mod status_row;
pub mod task_list_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use super::app::App;

const TITLE: &str = " TODO";

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if let Some(art) = &app.backdrop {
        backdrop::render_backdrop(frame.buffer_mut(), art, app.theme.backdrop, area);
    }

    // Layout: title row | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame.buffer_mut(), app, chunks[0]);
    task_list_view::render_task_list(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    if app.menu.is_some() {
        context_menu::render_context_menu(frame, app, area);
    } else {
        app.menu_area = None;
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Title on the left, task count on the right. Only glyph cells are written
/// so the backdrop shows through.
fn render_title(buf: &mut Buffer, app: &App, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(area.x, area.y, TITLE, area.width as usize, title_style);

    let count = match app.list.len() {
        1 => "1 task ".to_string(),
        n => format!("{} tasks ", n),
    };
    let title_w = TITLE.len() + 1;
    if title_w + count.len() <= area.width as usize {
        let x = area.right() - count.len() as u16;
        buf.set_string(x, area.y, &count, Style::default().fg(app.theme.dim));
    }
}
