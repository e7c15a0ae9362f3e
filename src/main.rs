// What you SEE when this runs:
// • The screen freezes: a borderless window shows a screenshot of it.
// • Guide lines + a circular magnifying loupe follow the mouse pointer.
// • Arrow keys nudge the pointer one pixel at a time for exact edges.
// • Hold Left Mouse and drag: a translucent selection box appears.
// • Release: a save dialog opens; pick a file and the crop is written.
//   Cancel and the session keeps going. ESC quits without saving.

mod config;
mod draw;
mod error;
mod lens;
mod nudge;
mod screen;
mod select;
mod session;
mod storage;
mod types;

use draw::Surface;
use error::Error;
use lens::{Lens, LensConfig};
use nudge::NudgeController;
use session::{Action, Event, SaveOutcome, Session};
use std::collections::VecDeque;
use types::Point;

fn main() -> Result<(), Error> {
    /* --- Freeze the screen before any window exists, so the grab is clean.
       A capture failure is fatal: no UI, non-zero exit. --- */
    let frozen = screen::capture()?;
    let (w, h) = (frozen.width, frozen.height);

    let mut surface = Surface::new("Loupeshot", w, h)?;
    let lens = Lens::new(LensConfig::default());
    let mut session = Session::new(lens.config().show_during_drag);
    let mut nudges = NudgeController::new();

    /* --- Reusable screen buffer: frozen frame + overlays, rebuilt every
       frame. Full redraw means old overlays can never stack or tear. --- */
    let mut screenbuf = frozen.clone();

    // Edge detection over minifb's polled state.
    let mut was_down = false;
    let mut last_pointer = Point::new(-1, -1);

    /* ------------------------------ Main loop ------------------------------ */
    while surface.is_open() && session.is_active() {
        /* 1) Poll input and derive discrete events. Nudged moves come back
           through the same pointer poll as hardware moves, so everything
           funnels through one path. */
        let mut events = Vec::new();
        if surface.esc_pressed() {
            events.push(Event::Escape);
        }
        for dir in surface.nudges_pressed() {
            events.push(Event::Nudge(dir));
        }
        if let Some(p) = surface.mouse_pos() {
            let down = surface.left_mouse_down();
            if down && !was_down {
                events.push(Event::ButtonPressed(p));
            } else if p != last_pointer {
                if down {
                    events.push(Event::ButtonDragged(p));
                } else {
                    events.push(Event::PointerMoved(p));
                }
            }
            if !down && was_down {
                events.push(Event::ButtonReleased(p));
            }
            was_down = down;
            last_pointer = p;
        }

        /* 2) Dispatch through the session and run the resulting actions. */
        let mut pending: VecDeque<Action> = events
            .into_iter()
            .flat_map(|ev| session.handle_event(ev))
            .collect();
        while let Some(action) = pending.pop_front() {
            match action {
                Action::MovePointer(dx, dy) => nudges.move_by(dx, dy),

                Action::End => {} // loop condition takes care of the rest

                Action::PromptSave(rect) => {
                    // Overlays are already hidden; present the bare frozen
                    // frame so the dialog opens over a clean capture.
                    surface.present(&frozen)?;

                    let outcome = match storage::prompt_save_path() {
                        None => SaveOutcome::Cancelled,
                        Some(path) => {
                            let cropped = frozen.crop(rect);
                            match storage::save_image(&cropped, &path) {
                                Ok(()) => {
                                    if let Some(dir) = path.parent() {
                                        config::remember_path(dir);
                                    }
                                    SaveOutcome::Saved
                                }
                                Err(e) => {
                                    eprintln!("{e}");
                                    SaveOutcome::Failed(e.to_string())
                                }
                            }
                        }
                    };
                    pending.extend(session.save_resolved(outcome));
                }
            }
        }

        /* 3) Redraw the scene from session state. */
        screenbuf.pixels.copy_from_slice(&frozen.pixels);
        if let Some(rect) = session.selection() {
            draw::draw_selection(&mut screenbuf, rect);
        }
        if session.guides_visible() {
            draw::draw_guides(&mut screenbuf, session.pointer());
        }
        if session.lens_visible() {
            let (sprite, at) = lens.render(&frozen, session.pointer(), session.anchor());
            draw::blit_sprite(&mut screenbuf, &sprite, at);
        }
        if let Some(banner) = session.status() {
            draw::draw_text_5x7(&mut screenbuf, 8, 8, banner, 0xFFFF_FFFF);
        }

        /* 4) Present. */
        surface.present(&screenbuf)?;
    }

    Ok(())
}
