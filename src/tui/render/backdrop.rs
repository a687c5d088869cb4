use std::fs;
use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use tracing::warn;

use crate::util::unicode::display_width;

/// Text art tiled behind the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    lines: Vec<String>,
    /// Width of one tile: the widest line
    tile_width: usize,
}

impl Backdrop {
    /// Read the art from a file. A missing or unreadable file means no
    /// backdrop, not an error.
    pub fn load(path: &Path) -> Option<Backdrop> {
        match fs::read_to_string(path) {
            Ok(text) => Backdrop::from_text(&text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read backdrop");
                None
            }
        }
    }

    /// `None` when the text has nothing visible.
    pub fn from_text(text: &str) -> Option<Backdrop> {
        let lines: Vec<String> = text
            .lines()
            .map(|line| line.replace('\t', "    ").replace('\r', ""))
            .collect();
        let tile_width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        if lines.iter().all(|l| l.trim().is_empty()) {
            return None;
        }
        Some(Backdrop { lines, tile_width })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Tile the art over `area` in `color`, leaving cell backgrounds alone.
pub fn render_backdrop(buf: &mut Buffer, backdrop: &Backdrop, color: Color, area: Rect) {
    let style = Style::default().fg(color);
    let tile = backdrop.tile_width;
    let width = area.width as usize;
    for dy in 0..area.height {
        let line = &backdrop.lines[dy as usize % backdrop.lines.len()];
        if line.is_empty() {
            continue;
        }
        let y = area.y + dy;
        let mut x = 0;
        while x < width {
            buf.set_stringn(area.x + x as u16, y, line, width - x, style);
            x += tile;
        }
    }
}
