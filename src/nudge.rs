// 1-pixel pointer nudges from the arrow keys. The nudge is injected as a
// real relative mouse move, so it round-trips through the OS pointer and
// re-enters the session as an ordinary pointer-moved event — downstream
// nobody can tell it from a hardware move.

use enigo::{Coordinate, Enigo, Mouse, Settings};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NudgeDir {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDir {
    /// One unit step per keypress. No repeat acceleration, no diagonals.
    pub fn delta(self) -> (i32, i32) {
        match self {
            NudgeDir::Up => (0, -1),
            NudgeDir::Down => (0, 1),
            NudgeDir::Left => (-1, 0),
            NudgeDir::Right => (1, 0),
        }
    }
}

/// Owned by the session driver: constructed on session entry, dropped on
/// exit. If the injection backend is unavailable, nudging silently does
/// nothing instead of taking the session down.
pub struct NudgeController {
    injector: Option<Enigo>,
}

impl NudgeController {
    pub fn new() -> Self {
        Self {
            injector: Enigo::new(&Settings::default()).ok(),
        }
    }

    /// Move the live pointer by (dx, dy). Failures are swallowed — the
    /// nudge just has no effect.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        if let Some(injector) = self.injector.as_mut() {
            let _ = injector.move_mouse(dx, dy, Coordinate::Rel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_direction_maps_to_one_unit_step() {
        assert_eq!(NudgeDir::Up.delta(), (0, -1));
        assert_eq!(NudgeDir::Down.delta(), (0, 1));
        assert_eq!(NudgeDir::Left.delta(), (-1, 0));
        assert_eq!(NudgeDir::Right.delta(), (1, 0));
    }
}
