use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    if area.width == 0 {
        return;
    }
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint) = match app.mode {
        Mode::Navigate | Mode::ContextMenu => {
            let len = app.list.len();
            let position = match app.selection.get() {
                Some(i) => format!(" {}/{}", i + 1, len),
                None => format!(" -/{}", len),
            };
            let mut spans = vec![Span::styled(position, dim)];
            if let Some(message) = &app.message {
                spans.push(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ));
            }
            let hint = if app.mode == Mode::ContextMenu {
                "\u{2191}\u{2193} choose  Enter run  Esc close".to_string()
            } else {
                navigate_hint(app)
            };
            (spans, hint)
        }
        Mode::Add | Mode::Edit => {
            let label = if app.mode == Mode::Add { " add: " } else { " edit: " };
            let hint = if app.mode == Mode::Add {
                "Enter add  Esc done"
            } else {
                "Enter save  Esc cancel"
            };
            let avail = width.saturating_sub(label.len() + 1);
            let (visible, cursor) = prompt_window(app.prompt.text(), app.prompt.cursor_col(), avail);
            let cursor_x = area.x as usize + label.len() + cursor;
            if cursor_x < area.right() as usize {
                frame.set_cursor_position(Position::new(cursor_x as u16, area.y));
            }
            let spans = vec![
                Span::styled(label, Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(visible, Style::default().fg(app.theme.text_bright).bg(bg)),
            ];
            (spans, hint.to_string())
        }
        Mode::ConfirmClear => {
            let question = match app.list.len() {
                1 => " Clear the only task? ".to_string(),
                n => format!(" Clear all {} tasks? ", n),
            };
            let spans = vec![
                Span::styled(question, Style::default().fg(app.theme.red).bg(bg)),
                Span::styled("y/n", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            (spans, String::new())
        }
    };

    // Right-aligned hint, dropped when it doesn't fit
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint) + 1;
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(format!("{} ", hint), dim));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Key hints for Navigate mode. Edit and delete only apply to a selection.
fn navigate_hint(app: &App) -> String {
    if !app.show_key_hints {
        return String::new();
    }
    let mut parts = vec!["a add"];
    if app.selection.get().is_some() {
        parts.push("e edit");
        parts.push("d delete");
    }
    parts.push("? help");
    parts.join("  ")
}

/// Slice of the prompt text that fits in `avail` cells with the cursor in
/// view, and the cursor's column within that slice.
fn prompt_window(text: &str, cursor_col: usize, avail: usize) -> (String, usize) {
    if avail == 0 {
        return (String::new(), 0);
    }
    let skip = (cursor_col + 1).saturating_sub(avail);
    let mut dropped = 0;
    let mut used = 0;
    let mut out = String::new();
    for g in text.graphemes(true) {
        let w = display_width(g);
        if dropped < skip {
            dropped += w;
            continue;
        }
        if used + w > avail {
            break;
        }
        used += w;
        out.push_str(g);
    }
    (out, cursor_col.saturating_sub(dropped))
}
