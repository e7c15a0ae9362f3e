// Frozen-frame source: one screen grab per session via xcap.
// Visual expectation: `capture()` returns exactly what the monitor showed
// the instant the tool started; every lens sample and the final crop read
// from this buffer, never from the live screen.

use crate::error::Error;
use crate::types::FrameBuffer;
use xcap::Monitor;

/// Grab the primary monitor once. Fatal on failure — the session aborts
/// before any window is shown.
///
/// Permissions note: on macOS the terminal needs "Screen Recording"
/// permission in System Settings > Privacy & Security.
pub fn capture() -> Result<FrameBuffer, Error> {
    let monitors = Monitor::all().map_err(|e| Error::Capture(format!("Enumerate monitors: {e}")))?;

    let primary = monitors
        .first()
        .cloned()
        .ok_or_else(|| Error::Capture("No monitors found".into()))?;

    let shot = primary
        .capture_image()
        .map_err(|e| Error::Capture(format!("Grab screen: {e}")))?;

    let (w, h) = (shot.width(), shot.height());
    if w == 0 || h == 0 {
        return Err(Error::Capture("Captured empty screenshot".into()));
    }

    // Repack RGBA into the 0xAARRGGBB layout the window buffer wants.
    let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
    for px in shot.pixels() {
        let [r, g, b, _] = px.0;
        pixels.push(0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32);
    }

    Ok(FrameBuffer {
        width: w as usize,
        height: h as usize,
        pixels,
    })
}
