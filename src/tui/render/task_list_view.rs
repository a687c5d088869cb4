use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::model::RowHighlight;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_with_ellipsis;

const FOCUS_MARK: &str = "\u{258C}"; // ▌
const GRIP: &str = "\u{283F}"; // ⠿
/// Narrowest ordinal column, in digits
const MIN_ORDINAL_DIGITS: u16 = 3;
/// Cells kept free right of the text: gap, grip, edge
const RIGHT_PAD: u16 = 3;
/// Indent of the floating row, so it reads as lifted off the list
const FLOAT_INDENT: u16 = 2;

struct RowPaint<'a> {
    ordinal: usize,
    digits: u16,
    text: &'a str,
    top: i32,
    bg: Option<Color>,
    selected: bool,
}

/// Draw the task rows over whatever is already in `area`. Rows without a
/// highlight only write their glyphs.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = area;
    app.list.set_viewport(area.width, area.height);

    let theme = &app.theme;
    let list = &app.list;
    let buf = frame.buffer_mut();
    let row_height = list.viewport().row_height() as i32;
    let digits = ordinal_digits(list.len());

    if list.is_empty() {
        let hint = "No tasks yet. Press a to add one.";
        if area.height > 1 && area.width > 2 {
            buf.set_stringn(
                area.x + 2,
                area.y + 1,
                hint,
                (area.width - 2) as usize,
                Style::default().fg(theme.dim),
            );
        }
        return;
    }

    for row in list.visible_rows() {
        let bg = match row.highlight {
            RowHighlight::None => None,
            RowHighlight::DropTarget => Some(theme.drop_bg),
            RowHighlight::Hover => Some(theme.hover_bg),
            RowHighlight::Selected => Some(theme.selection_bg),
        };
        let paint = RowPaint {
            ordinal: row.index + 1,
            digits,
            text: row.text,
            top: row.top,
            bg,
            selected: row.selected,
        };
        paint_row(buf, area, theme, 0, row_height, &paint);
    }

    if let Some(top) = list.focus_row() {
        for y in visible_lines(top, row_height, area) {
            buf.set_string(area.x, y, FOCUS_MARK, Style::default().fg(theme.focus));
        }
    }

    if let Some(floating) = list.floating_row() {
        let paint = RowPaint {
            ordinal: floating.source + 1,
            digits,
            text: floating.text,
            top: floating.top,
            bg: Some(theme.floating_bg),
            selected: true,
        };
        paint_row(buf, area, theme, FLOAT_INDENT, row_height, &paint);
    }
}

/// Width of the ordinal column for a list of `len` rows.
fn ordinal_digits(len: usize) -> u16 {
    let mut digits = 1;
    let mut n = len / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits.max(MIN_ORDINAL_DIGITS)
}

/// Screen rows of a list row that fall inside `area`.
fn visible_lines(top: i32, height: i32, area: Rect) -> impl Iterator<Item = u16> {
    let area_h = i32::from(area.height);
    (top..top + height)
        .filter(move |&y| (0..area_h).contains(&y))
        .map(move |y| area.y + y as u16)
}

fn paint_row(
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
    indent: u16,
    height: i32,
    row: &RowPaint,
) {
    if area.width <= indent {
        return;
    }
    let x = area.x + indent;
    let width = area.width - indent;
    let text_line = area.y as i32 + row.top + height / 2;

    for y in visible_lines(row.top, height, area) {
        if let Some(bg) = row.bg {
            buf.set_style(Rect::new(x, y, width, 1), Style::default().bg(bg));
        }
        if i32::from(y) != text_line {
            continue;
        }

        let ordinal = format!("{:>w$}", row.ordinal, w = row.digits as usize);
        buf.set_stringn(
            x + 1,
            y,
            &ordinal,
            width.saturating_sub(1) as usize,
            Style::default().fg(theme.ordinal),
        );

        // marker, digits, gap
        let text_col = row.digits + 2;
        if width > text_col + RIGHT_PAD {
            let max = (width - text_col - RIGHT_PAD) as usize;
            let text = truncate_with_ellipsis(row.text, max);
            buf.set_string(x + text_col, y, &text, theme.task_style(row.selected));
            buf.set_string(x + width - 2, y, GRIP, Style::default().fg(theme.grip));
        }
    }
}
