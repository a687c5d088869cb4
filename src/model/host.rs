//! Collaborators the task list talks to without knowing what they are.

/// Durable storage for the ordered task strings.
///
/// Implementations own their failure handling: `save` must not panic and
/// `load` returns an empty list when nothing usable is stored.
pub trait TaskStore {
    fn load(&mut self) -> Vec<String>;
    fn save(&mut self, tasks: &[String]);
}

/// Result of asking the user for replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Confirmed(String),
    Cancelled,
}

/// Source of replacement text for edit-in-place.
pub trait TextEntry {
    fn request(&mut self, current: &str) -> EntryOutcome;
}

impl<F> TextEntry for F
where
    F: FnMut(&str) -> EntryOutcome,
{
    fn request(&mut self, current: &str) -> EntryOutcome {
        self(current)
    }
}

/// The surface the list is drawn on. The list is transparent, so the
/// surface has to repaint whenever the list scrolls or a dragged row moves.
pub trait Surface {
    fn invalidate(&self);
}

/// Store that keeps nothing. Used for headless list manipulation where the
/// caller writes the result itself.
#[derive(Debug, Default)]
pub struct NullStore;

impl TaskStore for NullStore {
    fn load(&mut self) -> Vec<String> {
        Vec::new()
    }

    fn save(&mut self, _tasks: &[String]) {}
}

#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn invalidate(&self) {}
}
