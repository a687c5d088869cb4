use std::ops::Range;
use std::time::Duration;

/// A position in the list's local coordinate space (cells, origin at the
/// top-left of the list area). Coordinates outside the area are valid while
/// the pointer is captured by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// Tunables for list geometry and drag behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMetrics {
    /// Height of one row in cells
    pub row_height: u16,
    /// Pointer travel (cells) from the press point before a drag starts
    pub drag_threshold: u16,
    /// Band near the top/bottom edge that auto-scrolls during a drag
    pub auto_scroll_margin: u16,
    pub auto_scroll_interval: Duration,
    /// Rows scrolled per wheel notch
    pub wheel_step: u16,
}

impl Default for ListMetrics {
    fn default() -> Self {
        ListMetrics {
            row_height: 1,
            drag_threshold: 0,
            auto_scroll_margin: 1,
            auto_scroll_interval: Duration::from_millis(100),
            wheel_step: 1,
        }
    }
}

/// Vertical scroll state over a column of fixed-height rows.
///
/// The offset is kept within `[0, content_height - height]` at all times;
/// every mutator reports whether the offset actually moved.
#[derive(Debug, Clone)]
pub struct Viewport {
    row_height: u32,
    width: u16,
    height: u32,
    offset: u32,
}

impl Viewport {
    pub fn new(row_height: u16) -> Self {
        Viewport {
            row_height: u32::from(row_height.max(1)),
            width: 0,
            height: 0,
            offset: 0,
        }
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn content_height(&self, rows: usize) -> u32 {
        u32::try_from(rows)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.row_height)
    }

    pub fn max_offset(&self, rows: usize) -> u32 {
        self.content_height(rows).saturating_sub(self.height)
    }

    pub fn set_offset(&mut self, offset: i64, rows: usize) -> bool {
        let clamped = offset.clamp(0, i64::from(self.max_offset(rows))) as u32;
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    pub fn scroll_by(&mut self, delta: i64, rows: usize) -> bool {
        self.set_offset(i64::from(self.offset) + delta, rows)
    }

    /// Re-apply the bounds after the row count changed.
    pub fn clamp(&mut self, rows: usize) -> bool {
        self.set_offset(i64::from(self.offset), rows)
    }

    pub fn resize(&mut self, width: u16, height: u16, rows: usize) -> bool {
        self.width = width;
        self.height = u32::from(height);
        self.clamp(rows)
    }

    /// Row under a local y coordinate. Unbounded: negative above the first
    /// row, `>= rows` below the last one.
    pub fn row_at(&self, y: i32) -> i64 {
        (i64::from(y) + i64::from(self.offset)).div_euclid(i64::from(self.row_height))
    }

    /// Local y of the top edge of a row (negative when scrolled above).
    pub fn row_top(&self, index: usize) -> i32 {
        let top = index as i64 * i64::from(self.row_height) - i64::from(self.offset);
        top.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    pub fn row_intersects(&self, index: usize) -> bool {
        let top = i64::from(self.row_top(index));
        top < i64::from(self.height) && top + i64::from(self.row_height) > 0
    }

    pub fn row_fully_visible(&self, index: usize) -> bool {
        let top = i64::from(self.row_top(index));
        top >= 0 && top + i64::from(self.row_height) <= i64::from(self.height)
    }

    /// Indices of rows that intersect the viewport.
    pub fn visible_range(&self, rows: usize) -> Range<usize> {
        let start = (self.offset / self.row_height) as usize;
        let bottom = self.offset.saturating_add(self.height);
        let end = (bottom.div_ceil(self.row_height) as usize).min(rows);
        start.min(end)..end
    }

    /// Scroll the minimum amount that brings the whole row into view.
    pub fn ensure_visible(&mut self, index: usize, rows: usize) -> bool {
        if index >= rows || self.height == 0 {
            return false;
        }
        let top = i64::from(self.content_height(index));
        let bottom = top + i64::from(self.row_height);
        if top < i64::from(self.offset) {
            self.set_offset(top, rows)
        } else if bottom > i64::from(self.offset) + i64::from(self.height) {
            self.set_offset(bottom - i64::from(self.height), rows)
        } else {
            false
        }
    }
}
