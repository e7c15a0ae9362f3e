// Selection drag state machine: raw press/move/release positions in,
// normalized rectangles out. Rendering of the overlay lives in draw.rs;
// this module only owns the coordinates.

use crate::types::{Point, Rect};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Idle,
    Dragging { start: Point },
}

pub struct SelectionTracker {
    state: State,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Button down: Idle → Dragging, capturing the start corner. A press
    /// while already dragging is ignored (no nested drags).
    pub fn on_press(&mut self, p: Point) {
        if self.state == State::Idle {
            self.state = State::Dragging { start: p };
        }
    }

    /// Current rectangle while dragging; `None` when idle, so spurious
    /// move events after a reset do nothing. Does not change state.
    pub fn on_move(&self, p: Point) -> Option<Rect> {
        match self.state {
            State::Dragging { start } => Some(Rect::normalize(start, p)),
            State::Idle => None,
        }
    }

    /// Button up: Dragging → Idle, yielding the final normalized rect.
    /// `None` when idle (spurious release).
    pub fn on_release(&mut self, p: Point) -> Option<Rect> {
        match self.state {
            State::Dragging { start } => {
                self.state = State::Idle;
                Some(Rect::normalize(start, p))
            }
            State::Idle => None,
        }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Start corner of the active drag, if any. Used for anchor selection.
    pub fn start(&self) -> Option<Point> {
        match self.state {
            State::Dragging { start } => Some(start),
            State::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_and_release_while_idle_are_no_ops() {
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.on_move(Point::new(10, 10)), None);
        assert_eq!(tracker.on_release(Point::new(10, 10)), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn drag_produces_normalized_rects() {
        let mut tracker = SelectionTracker::new();
        tracker.on_press(Point::new(300, 250));
        let rect = tracker.on_move(Point::new(100, 100)).unwrap();
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (100, 100, 300, 250));
        assert!(tracker.is_dragging());

        let last = tracker.on_release(Point::new(120, 90)).unwrap();
        assert_eq!((last.x1, last.y1, last.x2, last.y2), (120, 90, 300, 250));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn press_then_release_at_same_point_is_zero_area() {
        let mut tracker = SelectionTracker::new();
        tracker.on_press(Point::new(50, 50));
        let rect = tracker.on_release(Point::new(50, 50)).unwrap();
        assert!(rect.is_empty());
    }

    #[test]
    fn nested_press_keeps_first_start() {
        let mut tracker = SelectionTracker::new();
        tracker.on_press(Point::new(10, 10));
        tracker.on_press(Point::new(99, 99));
        assert_eq!(tracker.start(), Some(Point::new(10, 10)));
    }
}
