// Window + software drawing utilities.
// Visual effects provided here:
// 1) A borderless full-screen window showing the frozen frame.
// 2) Guide lines that follow the pointer, plus the translucent selection box.
// 3) A tiny 5x7 bitmap font for the save-failure banner.

use crate::error::Error;
use crate::lens::GUIDE_COLOR;
use crate::nudge::NudgeDir;
use crate::types::{FrameBuffer, Point, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Fill color of the selection box (#d8f0e2), blended at TINT_ALPHA.
const SELECTION_TINT: u32 = 0x00D8_F0E2;
const TINT_ALPHA: u32 = 100; // out of 255

pub struct Surface {
    window: Window, // the on-screen window you see
}

impl Surface {
    /// Create a borderless window sized to the frozen frame, pinned to the
    /// screen origin so frame coordinates equal screen coordinates.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions {
            borderless: true,
            topmost: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_position(0, 0);
        window.set_target_fps(120);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (cancels the whole session).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current pointer position in window pixel coordinates (clamped).
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0) as i32, y.max(0.0) as i32))
    }

    /// True while the selection button is held.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Arrow keys pressed since the last poll, one entry per keypress
    /// (no key repeat — a nudge is exactly one pixel).
    pub fn nudges_pressed(&self) -> Vec<NudgeDir> {
        let keys = [
            (Key::Up, NudgeDir::Up),
            (Key::Down, NudgeDir::Down),
            (Key::Left, NudgeDir::Left),
            (Key::Right, NudgeDir::Right),
        ];
        keys.iter()
            .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|&(_, dir)| dir)
            .collect()
    }
}

/* ---------- Software drawing: pixels, guides, selection, sprites ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Blend `color` over the existing pixel at the given alpha (0..=255).
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    let old = fb.pixels[idx];
    let inv = 255 - alpha;

    let r = (((color >> 16) & 0xFF) * alpha + ((old >> 16) & 0xFF) * inv) / 255;
    let g = (((color >> 8) & 0xFF) * alpha + ((old >> 8) & 0xFF) * inv) / 255;
    let b = ((color & 0xFF) * alpha + (old & 0xFF) * inv) / 255;
    fb.pixels[idx] = 0xFF00_0000 | (r << 16) | (g << 8) | b;
}

/// Full-width horizontal + full-height vertical guide line through the
/// pointer. Visual: a thin crosshair spanning the whole screen.
pub fn draw_guides(fb: &mut FrameBuffer, pointer: Point) {
    for x in 0..fb.width as i32 {
        put_pixel(fb, x, pointer.y, GUIDE_COLOR);
    }
    for y in 0..fb.height as i32 {
        put_pixel(fb, pointer.x, y, GUIDE_COLOR);
    }
}

/// Translucent tint over the selection plus a solid border. Redrawn from
/// scratch every frame, so there is never more than one selection visible.
pub fn draw_selection(fb: &mut FrameBuffer, rect: Rect) {
    if rect.is_empty() {
        return;
    }

    for y in rect.y1..rect.y2 {
        for x in rect.x1..rect.x2 {
            blend_pixel(fb, x, y, SELECTION_TINT, TINT_ALPHA);
        }
    }

    // Border on the outermost selected pixels.
    for x in rect.x1..rect.x2 {
        put_pixel(fb, x, rect.y1, GUIDE_COLOR);
        put_pixel(fb, x, rect.y2 - 1, GUIDE_COLOR);
    }
    for y in rect.y1..rect.y2 {
        put_pixel(fb, rect.x1, y, GUIDE_COLOR);
        put_pixel(fb, rect.x2 - 1, y, GUIDE_COLOR);
    }
}

/// Alpha-keyed blit: sprite pixels with a zero alpha byte are skipped, so
/// the circular lens mask shows through to the frame underneath.
pub fn blit_sprite(fb: &mut FrameBuffer, sprite: &FrameBuffer, top_left: Point) {
    for y in 0..sprite.height {
        for x in 0..sprite.width {
            let px = sprite.pixels[y * sprite.width + x];
            if px >> 24 == 0 {
                continue;
            }
            put_pixel(fb, top_left.x + x as i32, top_left.y + y as i32, px);
        }
    }
}

/* ---------- 5x7 bitmap font (ASCII subset for the HUD banner) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters we need: S A V E F I L D
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny white glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0xFF00_0000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact banner string; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
