use std::time::Instant;

use tracing::debug;

use super::drag::{DragEnd, DragSession, ScrollDirection};
use super::geometry::{ListMetrics, Point, Viewport};
use super::host::{EntryOutcome, NullStore, NullSurface, Surface, TaskStore, TextEntry};

/// Interaction state derived from hover and drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Hovering(usize),
    Dragging { source: usize, target: usize },
}

/// Keyboard navigation and reordering commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Home,
    End,
    /// Move the selected task one row up
    MoveUp,
    /// Move the selected task one row down
    MoveDown,
}

/// Background treatment of a row, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    None,
    DropTarget,
    Hover,
    Selected,
}

/// One row of the render plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: usize,
    /// Local y of the row's top edge (negative when partially scrolled off)
    pub top: i32,
    pub text: &'a str,
    pub highlight: RowHighlight,
    pub selected: bool,
}

/// The dragged task, drawn at the pointer instead of at its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingRow<'a> {
    pub source: usize,
    pub top: i32,
    pub text: &'a str,
}

type SelectionHandler = Box<dyn FnMut(Option<usize>)>;

/// Ordered, reorderable list of tasks with selection, hover, drag-to-reorder
/// and scrolling.
///
/// Every operation is total: indices out of range are ignored or clamped.
/// Structural changes are handed to the [`TaskStore`]; anything that moves the
/// visible rows over the backdrop also invalidates the [`Surface`].
pub struct TaskList {
    tasks: Vec<String>,
    selected: Option<usize>,
    hover: Option<usize>,
    drag: Option<DragSession>,
    press: Option<Point>,
    focused: bool,
    viewport: Viewport,
    metrics: ListMetrics,
    store: Box<dyn TaskStore>,
    surface: Box<dyn Surface>,
    on_selection: Option<SelectionHandler>,
    needs_paint: bool,
}

impl TaskList {
    pub fn new(metrics: ListMetrics) -> Self {
        TaskList {
            tasks: Vec::new(),
            selected: None,
            hover: None,
            drag: None,
            press: None,
            focused: false,
            viewport: Viewport::new(metrics.row_height),
            metrics,
            store: Box::new(NullStore),
            surface: Box::new(NullSurface),
            on_selection: None,
            needs_paint: true,
        }
    }

    pub fn with_store(mut self, store: impl TaskStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Attach the selection-changed subscriber, replacing any previous one.
    pub fn on_selection_changed(&mut self, handler: impl FnMut(Option<usize>) + 'static) {
        self.on_selection = Some(Box::new(handler));
    }

    // -- read-only views ---------------------------------------------------

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tasks.get(index).map(String::as_str)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.get(i))
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn scroll_offset(&self) -> u32 {
        self.viewport.offset()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn metrics(&self) -> &ListMetrics {
        &self.metrics
    }

    pub fn state(&self) -> ListState {
        match (&self.drag, self.hover) {
            (Some(drag), _) => ListState::Dragging {
                source: drag.source(),
                target: drag.target(),
            },
            (None, Some(index)) => ListState::Hovering(index),
            (None, None) => ListState::Idle,
        }
    }

    /// Whether anything changed since the last call. The host paints when true.
    pub fn take_needs_paint(&mut self) -> bool {
        std::mem::take(&mut self.needs_paint)
    }

    /// When the auto-scroll timer next wants a [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.drag
            .as_ref()
            .and_then(|drag| drag.auto_scroll())
            .map(|timer| timer.next_tick())
    }

    // -- population --------------------------------------------------------

    /// Replace the contents with whatever the store holds.
    pub fn load_from_store(&mut self) {
        let tasks = self.store.load();
        debug!(count = tasks.len(), "loaded tasks");
        self.replace_all(tasks);
    }

    /// Swap in a new task sequence without persisting it. Ends any drag,
    /// keeps the selection when it still points at a row.
    pub fn replace_all(&mut self, tasks: Vec<String>) {
        self.end_drag(DragEnd::CaptureLost);
        self.tasks = tasks;
        self.press = None;
        self.hover = None;
        let len = self.tasks.len();
        self.set_selected(self.selected.filter(|&i| i < len));
        self.viewport.clamp(len);
        self.invalidate_surface();
    }

    // -- mutations ---------------------------------------------------------

    pub fn append(&mut self, text: impl Into<String>) {
        self.tasks.push(text.into());
        let last = self.tasks.len() - 1;
        if self.selected.is_none() {
            self.set_selected(Some(last));
        }
        self.invalidate();
        self.ensure_visible(last);
        self.persist();
    }

    /// Remove the selected task. Selection moves to the row that took its
    /// place, else the new last row, else nothing.
    pub fn remove_selected(&mut self) -> Option<String> {
        let index = self.selected.filter(|&i| i < self.tasks.len())?;
        self.end_drag(DragEnd::CaptureLost);
        let removed = self.tasks.remove(index);
        let len = self.tasks.len();
        self.hover = self.hover.filter(|&h| h < len);
        self.selected = if len == 0 {
            None
        } else {
            Some(index.min(len - 1))
        };
        debug!(index, remaining = len, "removed task");
        self.notify_selection();
        if self.viewport.clamp(len) {
            self.invalidate_surface();
        }
        self.invalidate();
        self.persist();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.end_drag(DragEnd::CaptureLost);
        self.tasks.clear();
        self.hover = None;
        self.press = None;
        self.set_selected(None);
        self.viewport.clamp(0);
        self.invalidate_surface();
        self.persist();
    }

    /// Move a task to another index. Both indices must be valid and distinct.
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        let len = self.tasks.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        self.end_drag(DragEnd::CaptureLost);
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        debug!(from, to, "moved task");
        self.set_selected(Some(to));
        self.ensure_visible(to);
        self.invalidate();
        self.persist();
        true
    }

    /// Select a row; an index past the last row clears the selection.
    pub fn select(&mut self, index: usize) {
        if index < self.tasks.len() {
            self.set_selected(Some(index));
        } else {
            self.set_selected(None);
        }
        self.invalidate();
    }

    pub fn clear_selection(&mut self) {
        self.set_selected(None);
        self.invalidate();
    }

    /// Overwrite the selected task with text from `entry`. Blank confirmations
    /// count as cancelled.
    pub fn edit_selected(&mut self, entry: &mut dyn TextEntry) -> bool {
        let Some(index) = self.selected.filter(|&i| i < self.tasks.len()) else {
            return false;
        };
        let replacement = match entry.request(&self.tasks[index]) {
            EntryOutcome::Confirmed(text) => text.trim().to_string(),
            EntryOutcome::Cancelled => return false,
        };
        if replacement.is_empty() || replacement == self.tasks[index] {
            return false;
        }
        self.tasks[index] = replacement;
        debug!(index, "edited task");
        self.invalidate();
        self.persist();
        true
    }

    /// Keyboard navigation. Returns whether the key did anything; keys are
    /// ignored while a drag is active.
    pub fn navigate(&mut self, key: NavKey) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let len = self.tasks.len();
        let target = match key {
            NavKey::Up => match self.selected {
                Some(i) if i > 0 => i - 1,
                _ => return false,
            },
            NavKey::Down => {
                let next = self.selected.map_or(0, |i| i + 1);
                if next >= len {
                    return false;
                }
                next
            }
            NavKey::Home if len > 0 => 0,
            NavKey::End if len > 0 => len - 1,
            NavKey::Home | NavKey::End => return false,
            NavKey::MoveUp => {
                return match self.selected {
                    Some(i) if i > 0 => self.move_to(i, i - 1),
                    _ => false,
                };
            }
            NavKey::MoveDown => {
                return match self.selected {
                    Some(i) if i + 1 < len => self.move_to(i, i + 1),
                    _ => false,
                };
            }
        };
        self.select(target);
        self.ensure_visible(target);
        true
    }

    // -- viewport ----------------------------------------------------------

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.viewport.width() == width && self.viewport.height() == u32::from(height) {
            return;
        }
        if self.viewport.resize(width, height, self.tasks.len()) {
            self.invalidate_surface();
        }
        self.invalidate();
    }

    /// Wheel scrolling: positive `notches` scroll down.
    pub fn scroll_by(&mut self, notches: i32) -> bool {
        let step = i64::from(notches)
            * i64::from(self.metrics.wheel_step.max(1))
            * i64::from(self.viewport.row_height());
        let changed = self.viewport.scroll_by(step, self.tasks.len());
        if changed {
            self.retarget_drag();
            self.invalidate_surface();
        }
        changed
    }

    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport.ensure_visible(index, self.tasks.len()) {
            self.invalidate_surface();
        }
    }

    // -- focus and pointer -------------------------------------------------

    pub fn focus_gained(&mut self) {
        self.focused = true;
        if self.selected.is_none() && !self.tasks.is_empty() {
            self.set_selected(Some(0));
        }
        self.invalidate();
    }

    pub fn focus_lost(&mut self) {
        self.focused = false;
        self.end_drag(DragEnd::CaptureLost);
        self.invalidate();
    }

    /// The host stopped routing pointer input to the list mid-gesture.
    pub fn capture_lost(&mut self) {
        self.press = None;
        self.end_drag(DragEnd::CaptureLost);
    }

    /// Left button pressed inside the list.
    pub fn pointer_down(&mut self, at: Point) {
        self.focused = true;
        self.press = Some(at);
        self.set_selected(self.row_index(at.y));
        self.invalidate();
    }

    pub fn pointer_move(&mut self, at: Point, left_held: bool, now: Instant) {
        if self.drag.is_some() {
            if left_held {
                self.drag_to(at, now);
            } else {
                // The release never reached us.
                self.capture_lost();
            }
            return;
        }

        if !left_held {
            self.press = None;
            let row = self.row_index(at.y);
            if row != self.hover {
                self.hover = row;
                self.invalidate();
            }
            return;
        }
        let Some(origin) = self.press else {
            return;
        };
        let threshold = i64::from(self.metrics.drag_threshold);
        if at.distance_squared(origin) > threshold * threshold
            && let Some(source) = self.row_index(origin.y)
        {
            self.start_drag(source, origin, at, now);
        }
    }

    /// Left button released. Commits the drag when one is active.
    pub fn pointer_up(&mut self) {
        self.press = None;
        self.end_drag(DragEnd::Release);
    }

    /// Pointer left the list area. Ignored while dragging (input is captured).
    pub fn pointer_left(&mut self) {
        if self.drag.is_some() {
            return;
        }
        if self.hover.take().is_some() {
            self.invalidate();
        }
    }

    /// Advance the auto-scroll timer. Returns whether the list scrolled.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let Some(timer) = drag.auto_scroll_mut() else {
            return false;
        };
        if !timer.is_due(now) {
            return false;
        }
        timer.rearm(now);
        let row_height = i64::from(self.viewport.row_height());
        let step = match timer.direction() {
            ScrollDirection::Up => -row_height,
            ScrollDirection::Down => row_height,
        };

        let scrolled = self.viewport.scroll_by(step, self.tasks.len());
        self.retarget_drag();
        if scrolled {
            self.invalidate_surface();
        }
        self.invalidate();
        scrolled
    }

    // -- render plan -------------------------------------------------------

    /// Rows intersecting the viewport, with their highlight. The source row of
    /// an active drag is left out; see [`floating_row`](Self::floating_row).
    pub fn visible_rows(&self) -> Vec<RowView<'_>> {
        let dragging = self.drag.as_ref().map(|d| (d.source(), d.target()));
        self.viewport
            .visible_range(self.tasks.len())
            .filter(|&index| dragging.is_none_or(|(source, _)| source != index))
            .map(|index| {
                let selected = self.selected == Some(index);
                let highlight = match dragging {
                    Some((_, target)) if target == index => RowHighlight::DropTarget,
                    Some(_) => RowHighlight::None,
                    None if self.hover == Some(index) && !selected => RowHighlight::Hover,
                    None if selected => RowHighlight::Selected,
                    None => RowHighlight::None,
                };
                RowView {
                    index,
                    top: self.viewport.row_top(index),
                    text: self.tasks[index].as_str(),
                    highlight,
                    selected,
                }
            })
            .collect()
    }

    pub fn floating_row(&self) -> Option<FloatingRow<'_>> {
        let drag = self.drag.as_ref()?;
        let half = (self.viewport.row_height() / 2) as i32;
        Some(FloatingRow {
            source: drag.source(),
            top: drag.pointer().y.saturating_sub(half),
            text: self.tasks.get(drag.source()).map(String::as_str)?,
        })
    }

    /// Top of the focus indicator: the selected row, when focused, not
    /// dragging and on screen.
    pub fn focus_row(&self) -> Option<i32> {
        if !self.focused || self.drag.is_some() {
            return None;
        }
        let index = self.selected?;
        self.viewport
            .row_intersects(index)
            .then(|| self.viewport.row_top(index))
    }

    // -- internals ---------------------------------------------------------

    fn row_index(&self, y: i32) -> Option<usize> {
        usize::try_from(self.viewport.row_at(y))
            .ok()
            .filter(|&i| i < self.tasks.len())
    }

    fn clamped_row(&self, y: i32) -> usize {
        let last = self.tasks.len().saturating_sub(1) as i64;
        self.viewport.row_at(y).clamp(0, last) as usize
    }

    fn edge_direction(&self, y: i32) -> Option<ScrollDirection> {
        let margin = i64::from(self.metrics.auto_scroll_margin);
        let y = i64::from(y);
        if y < margin {
            Some(ScrollDirection::Up)
        } else if y >= i64::from(self.viewport.height()) - margin {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }

    fn start_drag(&mut self, source: usize, origin: Point, at: Point, now: Instant) {
        self.hover = None;
        self.set_selected(Some(source));
        self.drag = Some(DragSession::new(source, origin));
        debug!(source, "drag started");
        self.drag_to(at, now);
    }

    fn drag_to(&mut self, at: Point, now: Instant) {
        let target = self.clamped_row(at.y);
        let direction = self.edge_direction(at.y);
        let interval = self.metrics.auto_scroll_interval;
        if let Some(drag) = self.drag.as_mut() {
            drag.set_pointer(at);
            drag.set_target(target);
            drag.steer(direction, interval, now);
        }
        self.invalidate_surface();
    }

    fn retarget_drag(&mut self) {
        let Some(pointer) = self.drag.as_ref().map(DragSession::pointer) else {
            return;
        };
        let target = self.clamped_row(pointer.y);
        if let Some(drag) = self.drag.as_mut() {
            drag.set_target(target);
        }
    }

    fn end_drag(&mut self, how: DragEnd) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let (source, target) = (drag.source(), drag.target());
        let len = self.tasks.len();
        debug!(source, target, ?how, "drag ended");
        if how == DragEnd::Release && source != target && source < len && target < len {
            let task = self.tasks.remove(source);
            self.tasks.insert(target, task);
            self.set_selected(Some(target));
            self.persist();
        }
        self.invalidate_surface();
    }

    fn set_selected(&mut self, selected: Option<usize>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.notify_selection();
        true
    }

    fn notify_selection(&mut self) {
        debug!(selected = ?self.selected, "selection changed");
        if let Some(handler) = self.on_selection.as_mut() {
            handler(self.selected);
        }
    }

    fn persist(&mut self) {
        self.store.save(&self.tasks);
    }

    fn invalidate(&mut self) {
        self.needs_paint = true;
    }

    fn invalidate_surface(&mut self) {
        self.surface.invalidate();
        self.needs_paint = true;
    }
}

impl Drop for TaskList {
    fn drop(&mut self) {
        self.end_drag(DragEnd::Teardown);
    }
}

impl std::fmt::Debug for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("selected", &self.selected)
            .field("hover", &self.hover)
            .field("drag", &self.drag)
            .field("offset", &self.viewport.offset())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingStore {
        saves: Rc<RefCell<Vec<Vec<String>>>>,
        initial: Vec<String>,
    }

    impl TaskStore for RecordingStore {
        fn load(&mut self) -> Vec<String> {
            self.initial.clone()
        }

        fn save(&mut self, tasks: &[String]) {
            self.saves.borrow_mut().push(tasks.to_vec());
        }
    }

    #[derive(Clone, Default)]
    struct CountingSurface(Rc<Cell<u32>>);

    impl Surface for CountingSurface {
        fn invalidate(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct Harness {
        list: TaskList,
        saves: Rc<RefCell<Vec<Vec<String>>>>,
        redraws: Rc<Cell<u32>>,
        notified: Rc<RefCell<Vec<Option<usize>>>>,
    }

    impl Harness {
        fn new(tasks: &[&str], height: u16) -> Self {
            let store = RecordingStore {
                initial: tasks.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            };
            let saves = Rc::clone(&store.saves);
            let surface = CountingSurface::default();
            let redraws = Rc::clone(&surface.0);
            let mut list = TaskList::new(ListMetrics::default())
                .with_store(store)
                .with_surface(surface);
            list.set_viewport(40, height);
            list.load_from_store();
            let notified = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&notified);
            list.on_selection_changed(move |sel| sink.borrow_mut().push(sel));
            redraws.set(0);
            Harness {
                list,
                saves,
                redraws,
                notified,
            }
        }

        fn tasks(&self) -> Vec<&str> {
            self.list.tasks().iter().map(String::as_str).collect()
        }

        fn notifications(&self) -> Vec<Option<usize>> {
            self.notified.borrow().clone()
        }

        fn save_count(&self) -> usize {
            self.saves.borrow().len()
        }
    }

    fn abcd() -> Harness {
        Harness::new(&["A", "B", "C", "D"], 10)
    }

    fn assert_selection_valid(list: &TaskList) {
        if let Some(i) = list.selected() {
            assert!(i < list.len(), "selection {i} out of range {}", list.len());
        }
    }

    // -- loading -------------------------------------------------------------

    #[test]
    fn load_populates_without_selecting_or_saving() {
        let h = abcd();
        assert_eq!(h.tasks(), vec!["A", "B", "C", "D"]);
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.save_count(), 0);
        assert_eq!(h.list.state(), ListState::Idle);
    }

    #[test]
    fn replace_all_keeps_valid_selection_and_drops_stale_one() {
        let mut h = abcd();
        h.list.select(1);
        h.list.replace_all(vec!["x".into(), "y".into()]);
        assert_eq!(h.list.selected(), Some(1));
        h.list.replace_all(vec!["only".into()]);
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.notifications(), vec![Some(1), None]);
        assert_eq!(h.save_count(), 0);
    }

    // -- append / remove / clear -------------------------------------------

    #[test]
    fn append_to_empty_list_selects_first_row() {
        let mut h = Harness::new(&[], 10);
        h.list.append("milk");
        assert_eq!(h.list.selected(), Some(0));
        assert_eq!(h.notifications(), vec![Some(0)]);
        assert_eq!(h.saves.borrow().last().unwrap(), &vec!["milk".to_string()]);
    }

    #[test]
    fn append_keeps_existing_selection() {
        let mut h = abcd();
        h.list.select(1);
        h.list.append("E");
        assert_eq!(h.list.selected(), Some(1));
        assert_eq!(h.tasks(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(h.notifications(), vec![Some(1)]);
    }

    #[test]
    fn append_scrolls_new_row_into_view() {
        let mut h = Harness::new(&["1", "2", "3"], 3);
        h.list.select(0);
        h.list.append("4");
        assert_eq!(h.list.scroll_offset(), 1);
        assert!(h.list.viewport().row_fully_visible(3));
        assert!(h.redraws.get() > 0);
    }

    #[test]
    fn remove_without_selection_is_silent() {
        let mut h = abcd();
        assert_eq!(h.list.remove_selected(), None);
        assert_eq!(h.tasks().len(), 4);
        assert!(h.notifications().is_empty());
        assert_eq!(h.save_count(), 0);
    }

    #[test]
    fn remove_keeps_index_when_possible() {
        let mut h = abcd();
        h.list.select(1);
        assert_eq!(h.list.remove_selected().as_deref(), Some("B"));
        assert_eq!(h.tasks(), vec!["A", "C", "D"]);
        assert_eq!(h.list.selected(), Some(1));
        assert_eq!(h.list.selected_text(), Some("C"));
        assert_eq!(h.notifications(), vec![Some(1), Some(1)]);
        assert_eq!(h.save_count(), 1);
    }

    #[test]
    fn remove_last_row_selects_new_last() {
        let mut h = abcd();
        h.list.select(3);
        h.list.remove_selected();
        assert_eq!(h.list.selected(), Some(2));
    }

    #[test]
    fn removing_only_task_clears_selection() {
        let mut h = Harness::new(&["solo"], 10);
        h.list.select(0);
        h.list.remove_selected();
        assert!(h.list.is_empty());
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.notifications(), vec![Some(0), None]);
    }

    #[test]
    fn remove_pulls_scroll_back_inside_content() {
        let mut h = Harness::new(&["1", "2", "3", "4", "5"], 3);
        h.list.navigate(NavKey::End);
        assert_eq!(h.list.scroll_offset(), 2);
        h.list.remove_selected();
        assert_eq!(h.list.scroll_offset(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut h = abcd();
        h.list.select(2);
        h.list.pointer_move(Point::new(1, 1), false, Instant::now());
        h.list.clear();
        assert!(h.list.is_empty());
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.list.hover(), None);
        assert!(!h.list.is_dragging());
        assert_eq!(h.saves.borrow().last().unwrap(), &Vec::<String>::new());
    }

    // -- move / select -----------------------------------------------------

    #[test]
    fn move_to_same_index_is_noop() {
        let mut h = abcd();
        h.list.select(2);
        assert!(!h.list.move_to(2, 2));
        assert_eq!(h.tasks(), vec!["A", "B", "C", "D"]);
        assert_eq!(h.notifications(), vec![Some(2)]);
        assert_eq!(h.save_count(), 0);
    }

    #[test]
    fn move_to_rejects_out_of_range() {
        let mut h = abcd();
        assert!(!h.list.move_to(0, 4));
        assert!(!h.list.move_to(9, 0));
        assert_eq!(h.save_count(), 0);
    }

    #[test]
    fn move_to_reorders_and_follows_with_selection() {
        let mut h = abcd();
        assert!(h.list.move_to(0, 3));
        assert_eq!(h.tasks(), vec!["B", "C", "D", "A"]);
        assert_eq!(h.list.selected(), Some(3));
        assert_eq!(h.notifications(), vec![Some(3)]);
        assert_eq!(h.save_count(), 1);
    }

    #[test]
    fn select_out_of_range_clears_and_notifies_only_on_change() {
        let mut h = abcd();
        h.list.select(1);
        h.list.select(1);
        h.list.select(7);
        h.list.select(9);
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.notifications(), vec![Some(1), None]);
    }

    #[test]
    fn selection_stays_valid_across_mixed_operations() {
        let mut h = Harness::new(&[], 4);
        let script: [(u8, usize, usize); 14] = [
            (0, 0, 0),
            (0, 0, 0),
            (2, 0, 1),
            (1, 0, 0),
            (0, 0, 0),
            (0, 0, 0),
            (2, 2, 0),
            (1, 0, 0),
            (1, 0, 0),
            (2, 0, 5),
            (1, 0, 0),
            (1, 0, 0),
            (1, 0, 0),
            (0, 0, 0),
        ];
        for (op, a, b) in script {
            match op {
                0 => h.list.append("t"),
                1 => {
                    h.list.remove_selected();
                }
                _ => {
                    h.list.move_to(a, b);
                }
            }
            assert_selection_valid(&h.list);
        }
        assert_eq!(h.list.len(), 1);
        assert_eq!(h.list.selected(), Some(0));
    }

    // -- keyboard ----------------------------------------------------------

    #[test]
    fn end_selects_last_and_scrolls_it_fully_into_view() {
        let mut h = Harness::new(&["1", "2", "3", "4", "5"], 3);
        assert!(h.list.navigate(NavKey::End));
        assert_eq!(h.list.selected(), Some(4));
        assert!(h.list.viewport().row_fully_visible(4));
        assert_eq!(h.list.scroll_offset(), 2);
        assert!(h.redraws.get() > 0);
    }

    #[test]
    fn home_and_arrows_clamp_without_wrapping() {
        let mut h = Harness::new(&["1", "2", "3"], 10);
        assert!(!h.list.navigate(NavKey::Up));
        assert!(h.list.navigate(NavKey::Down));
        assert_eq!(h.list.selected(), Some(0));
        assert!(!h.list.navigate(NavKey::Up));
        h.list.navigate(NavKey::End);
        assert!(!h.list.navigate(NavKey::Down));
        assert_eq!(h.list.selected(), Some(2));
        assert!(h.list.navigate(NavKey::Home));
        assert_eq!(h.list.selected(), Some(0));
    }

    #[test]
    fn navigation_on_empty_list_does_nothing() {
        let mut h = Harness::new(&[], 10);
        for key in [NavKey::Up, NavKey::Down, NavKey::Home, NavKey::End, NavKey::MoveDown] {
            assert!(!h.list.navigate(key));
        }
        assert!(h.notifications().is_empty());
    }

    #[test]
    fn move_keys_reorder_selected_task() {
        let mut h = abcd();
        h.list.select(1);
        assert!(h.list.navigate(NavKey::MoveDown));
        assert_eq!(h.tasks(), vec!["A", "C", "B", "D"]);
        assert_eq!(h.list.selected(), Some(2));
        assert!(h.list.navigate(NavKey::MoveUp));
        assert!(h.list.navigate(NavKey::MoveUp));
        assert_eq!(h.tasks(), vec!["B", "A", "C", "D"]);
        assert!(!h.list.navigate(NavKey::MoveUp));
        assert_eq!(h.save_count(), 3);
    }

    #[test]
    fn up_scrolls_selected_row_back_into_view() {
        let mut h = Harness::new(&["1", "2", "3", "4", "5"], 2);
        h.list.navigate(NavKey::End);
        assert_eq!(h.list.scroll_offset(), 3);
        h.list.navigate(NavKey::Up);
        h.list.navigate(NavKey::Up);
        assert_eq!(h.list.selected(), Some(2));
        assert_eq!(h.list.scroll_offset(), 2);
    }

    // -- edit ----------------------------------------------------------------

    #[test]
    fn edit_replaces_text_in_place() {
        let mut h = abcd();
        h.list.select(2);
        let mut entry = |current: &str| EntryOutcome::Confirmed(format!("  {current}!  "));
        assert!(h.list.edit_selected(&mut entry));
        assert_eq!(h.tasks(), vec!["A", "B", "C!", "D"]);
        assert_eq!(h.list.selected(), Some(2));
        assert_eq!(h.notifications(), vec![Some(2)]);
        assert_eq!(h.save_count(), 1);
    }

    #[test]
    fn edit_cancel_or_blank_leaves_task() {
        let mut h = abcd();
        h.list.select(0);
        assert!(!h.list.edit_selected(&mut |_: &str| EntryOutcome::Cancelled));
        assert!(!h.list.edit_selected(&mut |_: &str| EntryOutcome::Confirmed("   ".into())));
        assert_eq!(h.list.get(0), Some("A"));
        assert_eq!(h.save_count(), 0);
    }

    #[test]
    fn edit_without_selection_never_asks() {
        let mut h = abcd();
        let mut asked = false;
        let mut entry = |_: &str| {
            asked = true;
            EntryOutcome::Confirmed("x".into())
        };
        assert!(!h.list.edit_selected(&mut entry));
        assert!(!asked);
    }

    // -- pointer & drag ------------------------------------------------------

    fn drag(h: &mut Harness, from_row: i32, to_row: i32, now: Instant) {
        h.list.pointer_down(Point::new(5, from_row));
        h.list.pointer_move(Point::new(5, to_row), true, now);
    }

    #[test]
    fn hover_tracks_pointer_and_clears_on_leave() {
        let mut h = abcd();
        let now = Instant::now();
        h.list.pointer_move(Point::new(3, 2), false, now);
        assert_eq!(h.list.state(), ListState::Hovering(2));
        h.list.pointer_move(Point::new(3, 8), false, now);
        assert_eq!(h.list.hover(), None);
        h.list.pointer_move(Point::new(3, 1), false, now);
        h.list.pointer_left();
        assert_eq!(h.list.state(), ListState::Idle);
    }

    #[test]
    fn press_selects_row_and_press_below_rows_clears() {
        let mut h = abcd();
        h.list.pointer_down(Point::new(0, 3));
        assert_eq!(h.list.selected(), Some(3));
        assert!(h.list.is_focused());
        h.list.pointer_up();
        h.list.pointer_down(Point::new(0, 7));
        assert_eq!(h.list.selected(), None);
        assert_eq!(h.notifications(), vec![Some(3), None]);
    }

    #[test]
    fn drag_needs_button_and_threshold() {
        let mut h = Harness::new(&["A", "B", "C", "D"], 10);
        let now = Instant::now();
        h.list.metrics.drag_threshold = 2;
        h.list.pointer_down(Point::new(5, 1));
        h.list.pointer_move(Point::new(6, 2), true, now); // distance² 2, not past 2²
        assert!(!h.list.is_dragging());
        h.list.pointer_move(Point::new(5, 3), false, now);
        h.list.pointer_move(Point::new(5, 4), true, now);
        assert!(!h.list.is_dragging(), "press was forgotten once the button came up");
        h.list.pointer_down(Point::new(5, 1));
        h.list.pointer_move(Point::new(5, 4), true, now);
        assert_eq!(
            h.list.state(),
            ListState::Dragging {
                source: 1,
                target: 3
            }
        );
        assert_eq!(h.list.hover(), None);
    }

    #[test]
    fn drag_from_empty_area_does_not_start() {
        let mut h = abcd();
        drag(&mut h, 6, 1, Instant::now());
        assert!(!h.list.is_dragging());
    }

    #[test]
    fn dragging_row_two_to_top_reorders() {
        let mut h = abcd();
        drag(&mut h, 2, 0, Instant::now());
        assert_eq!(
            h.list.state(),
            ListState::Dragging {
                source: 2,
                target: 0
            }
        );
        h.list.pointer_up();
        assert_eq!(h.tasks(), vec!["C", "A", "B", "D"]);
        assert_eq!(h.list.selected(), Some(0));
        assert_eq!(h.notifications(), vec![Some(2), Some(0)]);
        assert_eq!(h.save_count(), 1);
        assert_eq!(h.list.state(), ListState::Idle);
    }

    #[test]
    fn release_on_source_changes_nothing() {
        let mut h = abcd();
        let now = Instant::now();
        drag(&mut h, 1, 3, now);
        h.list.pointer_move(Point::new(5, 1), true, now);
        let before = h.notifications();
        h.list.pointer_up();
        assert_eq!(h.tasks(), vec!["A", "B", "C", "D"]);
        assert_eq!(h.notifications(), before);
        assert_eq!(h.save_count(), 0);
        assert!(!h.list.is_dragging());
    }

    #[test]
    fn drag_target_is_clamped_to_rows() {
        let mut h = abcd();
        let now = Instant::now();
        drag(&mut h, 1, -30, now);
        assert_eq!(h.list.drag().unwrap().target(), 0);
        h.list.pointer_move(Point::new(5, 50), true, now);
        assert_eq!(h.list.drag().unwrap().target(), 3);
    }

    #[test]
    fn pointer_leave_is_ignored_while_dragging() {
        let mut h = abcd();
        drag(&mut h, 0, 2, Instant::now());
        h.list.pointer_left();
        assert!(h.list.is_dragging());
    }

    #[test]
    fn capture_loss_ends_drag_without_moving() {
        let mut h = abcd();
        drag(&mut h, 0, 3, Instant::now());
        h.list.capture_lost();
        assert!(h.list.drag().is_none());
        assert_eq!(h.tasks(), vec!["A", "B", "C", "D"]);
        assert_eq!(h.list.next_deadline(), None);
    }

    #[test]
    fn plain_move_after_missed_release_ends_drag() {
        let mut h = long_list(5);
        let now = Instant::now();
        let before = h.list.tasks().to_vec();
        drag(&mut h, 1, 4, now);
        assert!(h.list.next_deadline().is_some());
        h.list.pointer_move(Point::new(5, 3), false, now);
        assert!(!h.list.is_dragging());
        assert_eq!(h.list.next_deadline(), None);
        assert!(!h.list.tick(now + Duration::from_secs(1)));
        assert_eq!(h.list.scroll_offset(), 0);
        assert_eq!(h.save_count(), 0);
        assert_eq!(h.list.tasks(), before.as_slice());

        // a later release has nothing left to commit
        h.list.pointer_up();
        assert_eq!(h.save_count(), 0);
    }

    #[test]
    fn hover_waits_while_button_is_held() {
        let mut h = Harness::new(&["A", "B", "C", "D"], 10);
        h.list.metrics.drag_threshold = 2;
        let now = Instant::now();
        h.list.pointer_down(Point::new(5, 1));
        h.list.pointer_move(Point::new(5, 2), true, now);
        assert!(!h.list.is_dragging());
        assert_eq!(h.list.hover(), None);
        h.list.pointer_move(Point::new(5, 2), false, now);
        assert_eq!(h.list.hover(), Some(2));
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut h = abcd();
        drag(&mut h, 0, 3, Instant::now());
        h.list.focus_lost();
        assert!(!h.list.is_dragging());
        assert!(!h.list.is_focused());
    }

    #[test]
    fn focus_gained_selects_first_row_once() {
        let mut h = abcd();
        h.list.focus_gained();
        assert_eq!(h.list.selected(), Some(0));
        h.list.select(2);
        h.list.focus_gained();
        assert_eq!(h.list.selected(), Some(2));
    }

    #[test]
    fn keys_are_ignored_while_dragging() {
        let mut h = abcd();
        drag(&mut h, 1, 2, Instant::now());
        assert!(!h.list.navigate(NavKey::Home));
        assert_eq!(h.list.selected(), Some(1));
    }

    #[test]
    fn drag_moves_invalidate_the_surface() {
        let mut h = abcd();
        let now = Instant::now();
        drag(&mut h, 0, 1, now);
        let before = h.redraws.get();
        h.list.pointer_move(Point::new(7, 2), true, now);
        assert!(h.redraws.get() > before);
    }

    // -- auto-scroll -------------------------------------------------------

    fn long_list(height: u16) -> Harness {
        let names: Vec<String> = (1..=20).map(|i| format!("task {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Harness::new(&refs, height)
    }

    #[test]
    fn pointer_in_bottom_margin_scrolls_each_interval() {
        let mut h = long_list(5);
        let t0 = Instant::now();
        drag(&mut h, 1, 4, t0);
        let deadline = h.list.next_deadline().expect("timer running");
        assert!(!h.list.tick(deadline - Duration::from_millis(1)));
        assert!(h.list.tick(deadline));
        assert_eq!(h.list.scroll_offset(), 1);
        assert_eq!(h.list.drag().unwrap().target(), 5);
        assert!(h.list.tick(deadline + Duration::from_millis(100)));
        assert_eq!(h.list.scroll_offset(), 2);
        assert_eq!(h.list.drag().unwrap().target(), 6);
    }

    #[test]
    fn auto_scroll_stops_at_bounds_and_when_pointer_leaves_margin() {
        let mut h = long_list(5);
        let t0 = Instant::now();
        drag(&mut h, 2, 0, t0);
        // already at the top: timer runs but cannot scroll
        assert!(!h.list.tick(t0 + Duration::from_millis(100)));
        assert_eq!(h.list.scroll_offset(), 0);
        h.list.pointer_move(Point::new(5, 2), true, t0);
        assert_eq!(h.list.next_deadline(), None);
    }

    #[test]
    fn auto_scroll_redraws_surface_when_offset_changes() {
        let mut h = long_list(5);
        let t0 = Instant::now();
        drag(&mut h, 1, 4, t0);
        let before = h.redraws.get();
        h.list.tick(t0 + Duration::from_secs(1));
        assert!(h.redraws.get() > before);
    }

    #[test]
    fn ended_drag_leaves_no_timer_to_fire() {
        for end in 0..3 {
            let mut h = long_list(5);
            let t0 = Instant::now();
            drag(&mut h, 1, 4, t0);
            assert!(h.list.next_deadline().is_some());
            match end {
                0 => h.list.pointer_up(),
                1 => h.list.capture_lost(),
                _ => h.list.focus_lost(),
            }
            let order = h.list.tasks().to_vec();
            let offset = h.list.scroll_offset();
            assert!(h.list.drag().is_none());
            assert!(!h.list.tick(t0 + Duration::from_secs(5)));
            assert_eq!(h.list.tasks(), order.as_slice());
            assert_eq!(h.list.scroll_offset(), offset);
        }
    }

    #[test]
    fn teardown_mid_drag_does_not_save_a_move() {
        let h = abcd();
        let saves = Rc::clone(&h.saves);
        let Harness { mut list, .. } = h;
        list.pointer_down(Point::new(0, 0));
        list.pointer_move(Point::new(0, 3), true, Instant::now());
        drop(list);
        assert!(saves.borrow().is_empty());
    }

    #[test]
    fn wheel_scroll_is_clamped_and_retargets_drag() {
        let mut h = long_list(5);
        assert!(h.list.scroll_by(3));
        assert_eq!(h.list.scroll_offset(), 3);
        assert!(h.list.scroll_by(100));
        assert_eq!(h.list.scroll_offset(), 15);
        assert!(!h.list.scroll_by(1));
        drag(&mut h, 2, 3, Instant::now());
        assert_eq!(h.list.drag().unwrap().target(), 18);
        h.list.scroll_by(-2);
        assert_eq!(h.list.drag().unwrap().target(), 16);
    }

    // -- render plan -------------------------------------------------------

    #[test]
    fn visible_rows_skip_offscreen_rows() {
        let mut h = long_list(4);
        h.list.scroll_by(5);
        let rows: Vec<usize> = h.list.visible_rows().iter().map(|r| r.index).collect();
        assert_eq!(rows, vec![5, 6, 7, 8]);
        assert_eq!(h.list.visible_rows()[0].top, 0);
    }

    #[test]
    fn highlight_priority_follows_interaction() {
        let mut h = abcd();
        let now = Instant::now();
        h.list.select(1);
        h.list.pointer_move(Point::new(0, 2), false, now);
        let rows = h.list.visible_rows();
        assert_eq!(rows[1].highlight, RowHighlight::Selected);
        assert_eq!(rows[2].highlight, RowHighlight::Hover);
        assert_eq!(rows[0].highlight, RowHighlight::None);

        // hovering the selected row keeps the selection look
        h.list.pointer_move(Point::new(0, 1), false, now);
        assert_eq!(h.list.visible_rows()[1].highlight, RowHighlight::Selected);

        drag(&mut h, 1, 3, now);
        let rows = h.list.visible_rows();
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2, 3], "source row is not drawn in place");
        assert_eq!(rows[2].highlight, RowHighlight::DropTarget);
        assert!(rows.iter().all(|r| r.highlight != RowHighlight::Selected));
    }

    #[test]
    fn floating_row_follows_pointer() {
        let mut h = abcd();
        drag(&mut h, 0, 2, Instant::now());
        let floating = h.list.floating_row().unwrap();
        assert_eq!(floating.source, 0);
        assert_eq!(floating.text, "A");
        assert_eq!(floating.top, 2);
    }

    #[test]
    fn focus_row_only_when_focused_and_idle() {
        let mut h = abcd();
        h.list.select(1);
        assert_eq!(h.list.focus_row(), None);
        h.list.focus_gained();
        assert_eq!(h.list.focus_row(), Some(1));
        drag(&mut h, 1, 3, Instant::now());
        assert_eq!(h.list.focus_row(), None);
    }

    #[test]
    fn needs_paint_is_consumed() {
        let mut h = abcd();
        h.list.take_needs_paint();
        assert!(!h.list.take_needs_paint());
        h.list.select(0);
        assert!(h.list.take_needs_paint());
    }
}
