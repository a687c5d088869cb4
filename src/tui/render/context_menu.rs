use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, MenuItem};

/// Draw the right-click menu next to where it was opened, kept on screen.
pub fn render_context_menu(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(menu) = app.menu else {
        return;
    };
    let inner_w = MenuItem::ALL
        .iter()
        .map(|item| item.label().len())
        .max()
        .unwrap_or(0) as u16
        + 2;
    let width = (inner_w + 2).min(area.width);
    let height = (MenuItem::ALL.len() as u16 + 2).min(area.height);

    let x = menu.column.min(area.right().saturating_sub(width));
    let y = if menu.row + height > area.bottom() {
        menu.row.saturating_sub(height).max(area.y)
    } else {
        menu.row
    };
    let menu_area = Rect::new(x, y, width, height);
    app.menu_area = Some(menu_area);

    let bg = app.theme.background;
    let lines: Vec<Line> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == menu.cursor {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            let label = format!(" {:<w$} ", item.label(), w = inner_w as usize - 2);
            Line::from(Span::styled(label, style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, menu_area);
    frame.render_widget(Paragraph::new(lines).block(block), menu_area);
}
