use std::time::{Duration, Instant};

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Why a drag session ended. Only a release commits the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    Release,
    CaptureLost,
    Teardown,
}

/// Periodic edge scrolling while the pointer sits in the auto-scroll margin.
///
/// Lives inside the drag session, so it cannot outlive the gesture.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    direction: ScrollDirection,
    interval: Duration,
    next_tick: Instant,
}

impl AutoScroll {
    fn start(direction: ScrollDirection, interval: Duration, now: Instant) -> Self {
        AutoScroll {
            direction,
            interval,
            next_tick: now + interval,
        }
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    pub(super) fn rearm(&mut self, now: Instant) {
        self.next_tick = now + self.interval;
    }
}

/// An in-progress drag-to-reorder gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    source: usize,
    target: usize,
    origin: Point,
    pointer: Point,
    auto_scroll: Option<AutoScroll>,
}

impl DragSession {
    pub(super) fn new(source: usize, origin: Point) -> Self {
        DragSession {
            source,
            target: source,
            origin,
            pointer: origin,
            auto_scroll: None,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Where the button went down
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Last known pointer position (captured, may lie outside the list)
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn auto_scroll(&self) -> Option<&AutoScroll> {
        self.auto_scroll.as_ref()
    }

    pub(super) fn auto_scroll_mut(&mut self) -> Option<&mut AutoScroll> {
        self.auto_scroll.as_mut()
    }

    pub(super) fn set_target(&mut self, target: usize) {
        self.target = target;
    }

    pub(super) fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Start, redirect or stop edge scrolling. A running timer keeps its
    /// schedule when only the direction changes.
    pub(super) fn steer(
        &mut self,
        direction: Option<ScrollDirection>,
        interval: Duration,
        now: Instant,
    ) {
        let Some(direction) = direction else {
            self.auto_scroll = None;
            return;
        };
        if let Some(running) = self.auto_scroll.as_mut() {
            running.direction = direction;
        } else {
            self.auto_scroll = Some(AutoScroll::start(direction, interval, now));
        }
    }
}
