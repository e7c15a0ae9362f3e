// One capture session as a pure state machine. The driver (main.rs) polls
// the window, turns raw input into `Event`s, feeds them through
// `handle_event`, and executes whatever `Action`s come back. Everything
// that needs a display or a dialog happens outside; this module stays
// testable without either.

use crate::nudge::NudgeDir;
use crate::select::SelectionTracker;
use crate::types::{Anchor, Point, Rect};

/// Discrete input, already edge-detected by the driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    PointerMoved(Point),
    ButtonPressed(Point),
    ButtonDragged(Point),
    ButtonReleased(Point),
    Nudge(NudgeDir),
    Escape,
}

/// Side effects the driver must perform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Inject a synthetic relative pointer move (keyboard nudge).
    MovePointer(i32, i32),
    /// Present a clean frame, open the modal save dialog for this rect,
    /// then report back through `save_resolved`.
    PromptSave(Rect),
    /// The session is over; tear the window down.
    End,
}

/// How the save flow ended, reported back by the driver.
#[derive(Clone, Debug)]
pub enum SaveOutcome {
    Saved,
    Cancelled,
    Failed(String),
}

/// Banner text for a failed save; detail goes to stderr (the HUD font only
/// carries a small charset).
const SAVE_FAILED_BANNER: &str = "SAVE FAILED";

pub struct Session {
    active: bool,
    pointer: Point,
    press_origin: Point, // last press position; anchors idle motion too
    anchor: Anchor,
    tracker: SelectionTracker,
    selection: Option<Rect>, // overlay rect while dragging
    lens_visible: bool,
    show_lens_during_drag: bool,
    status: Option<&'static str>,
}

impl Session {
    pub fn new(show_lens_during_drag: bool) -> Self {
        Self {
            active: true,
            pointer: Point::new(0, 0),
            press_origin: Point::new(0, 0),
            anchor: Anchor::Se,
            tracker: SelectionTracker::new(),
            selection: None,
            lens_visible: true,
            show_lens_during_drag,
            status: None,
        }
    }

    /// Dispatch one event. Events after the session ended are dropped.
    pub fn handle_event(&mut self, event: Event) -> Vec<Action> {
        if !self.active {
            return Vec::new();
        }

        match event {
            Event::Escape => {
                // Cancel everything: nothing saved, nothing persisted.
                self.active = false;
                vec![Action::End]
            }

            Event::Nudge(dir) => {
                // The injected move comes back to us as PointerMoved.
                let (dx, dy) = dir.delta();
                vec![Action::MovePointer(dx, dy)]
            }

            Event::PointerMoved(p) => {
                self.pointer = p;
                self.anchor = Anchor::from_drag(self.press_origin, p);
                Vec::new()
            }

            Event::ButtonPressed(p) => {
                self.pointer = p;
                self.press_origin = p;
                self.status = None; // a new attempt clears the old banner
                self.tracker.on_press(p);
                // Zero-size selection appears right under the cursor.
                self.selection = Some(Rect::normalize(p, p));
                self.anchor = Anchor::from_drag(p, p);
                if !self.show_lens_during_drag {
                    self.lens_visible = false;
                }
                Vec::new()
            }

            Event::ButtonDragged(p) => {
                self.pointer = p;
                if let Some(rect) = self.tracker.on_move(p) {
                    self.selection = Some(rect);
                    let start = self.tracker.start().unwrap_or(self.press_origin);
                    self.anchor = Anchor::from_drag(start, p);
                }
                Vec::new()
            }

            Event::ButtonReleased(p) => {
                self.pointer = p;
                self.selection = None;
                match self.tracker.on_release(p) {
                    // A real selection: hide all overlays and hand the rect
                    // to the save flow.
                    Some(rect) if !rect.is_empty() => {
                        self.lens_visible = false;
                        vec![Action::PromptSave(rect)]
                    }
                    // Zero-area release (or a spurious release while idle):
                    // nothing to save, just re-arm the lens.
                    _ => {
                        self.lens_visible = true;
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Driver callback once the save flow resolved.
    pub fn save_resolved(&mut self, outcome: SaveOutcome) -> Vec<Action> {
        match outcome {
            SaveOutcome::Saved => {
                self.active = false;
                vec![Action::End]
            }
            SaveOutcome::Cancelled => {
                // Normal outcome, not an error: keep going with the lens back.
                self.lens_visible = true;
                Vec::new()
            }
            SaveOutcome::Failed(_) => {
                // Keep the session alive so the user can retry another path;
                // the banner stays up until things change.
                self.lens_visible = true;
                self.status = Some(SAVE_FAILED_BANNER);
                Vec::new()
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Rect to draw as the translucent selection overlay, if dragging.
    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn lens_visible(&self) -> bool {
        self.lens_visible
    }

    /// Guide lines follow the pointer for the whole session.
    pub fn guides_visible(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> Option<&str> {
        self.status
    }
}
