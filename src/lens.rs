// The magnifying loupe: samples a small window of the frozen frame around
// the pointer, blows each source pixel up into a scale×scale block, masks
// the result into a circle, and stamps the cursor cross + center guide
// lines on top. Nearest-neighbor on purpose — the whole point of the lens
// is that individual source pixels stay crisply visible while selecting.

use crate::types::{Anchor, FrameBuffer, Point};

/// Dark gray substituted for sample coordinates outside the frame, so the
/// lens still renders when the cursor sits at a screen edge.
pub const SENTINEL: u32 = 0xFF14_1414;

/// Color of the guide lines, shared with the full-screen ones.
pub const GUIDE_COLOR: u32 = 0xFFAD_C0B5;

const WHITE: u32 = 0xFFFF_FFFF;
const BLACK: u32 = 0xFF00_0000;

/// Fixed for the whole session; the circular mask is derived from it once.
pub struct LensConfig {
    pub sample_w: usize,       // source pixels sampled horizontally
    pub sample_h: usize,       // source pixels sampled vertically
    pub scale: usize,          // magnification: one sample becomes scale×scale
    pub edge_offset: i32,      // gap between the cursor and the lens rim
    pub show_during_drag: bool, // policy: keep the loupe up while dragging?
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            sample_w: 10,
            sample_h: 10,
            scale: 15,
            edge_offset: 10,
            show_during_drag: true,
        }
    }
}

pub struct Lens {
    cfg: LensConfig,
    width: usize,    // sample_w * scale
    height: usize,   // sample_h * scale
    mask: Vec<bool>, // true inside the inscribed ellipse; computed once
}

impl Lens {
    /// Precomputes the circular mask. The config never changes afterwards,
    /// so this is the only time the mask is built.
    pub fn new(cfg: LensConfig) -> Self {
        let width = cfg.sample_w * cfg.scale;
        let height = cfg.sample_h * cfg.scale;

        // Inscribed ellipse test per pixel center.
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        let mut mask = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let dx = (x as f32 + 0.5 - rx) / rx;
                let dy = (y as f32 + 0.5 - ry) / ry;
                mask.push(dx * dx + dy * dy <= 1.0);
            }
        }

        Self { cfg, width, height, mask }
    }

    pub fn config(&self) -> &LensConfig {
        &self.cfg
    }

    /// Lens sprite size in screen pixels.
    #[cfg(test)]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Build the loupe for the current pointer and return it together with
    /// the top-left corner it should be blitted at. Never fails: samples
    /// outside the frame come back as the sentinel color.
    pub fn render(&self, frame: &FrameBuffer, pointer: Point, anchor: Anchor) -> (FrameBuffer, Point) {
        let samples = self.sample(frame, pointer);
        let mut sprite = self.magnify(&samples);
        self.apply_mask(&mut sprite);
        self.decorate(&mut sprite);
        (sprite, self.placement(pointer, anchor))
    }

    /// Read the half-open sample window
    /// [px − w/2, px + w/2) × [py − h/2, py + h/2) from the frame.
    fn sample(&self, frame: &FrameBuffer, pointer: Point) -> Vec<u32> {
        let half_w = self.cfg.sample_w as i32 / 2;
        let half_h = self.cfg.sample_h as i32 / 2;

        let mut out = Vec::with_capacity(self.cfg.sample_w * self.cfg.sample_h);
        for y in pointer.y - half_h..pointer.y + (self.cfg.sample_h as i32 - half_h) {
            for x in pointer.x - half_w..pointer.x + (self.cfg.sample_w as i32 - half_w) {
                // Out-of-frame reads are masked with the sentinel, not failed.
                let px = frame.get_pixel(x, y).unwrap_or(SENTINEL);
                out.push(px | 0xFF00_0000);
            }
        }
        out
    }

    /// Nearest-neighbor upscale: replicate each sample into a scale×scale
    /// block. Output is always (sample_w·scale) × (sample_h·scale).
    fn magnify(&self, samples: &[u32]) -> FrameBuffer {
        let mut sprite = FrameBuffer::new(self.width, self.height);
        for y in 0..self.height {
            let sample_row = (y / self.cfg.scale) * self.cfg.sample_w;
            for x in 0..self.width {
                sprite.pixels[y * self.width + x] = samples[sample_row + x / self.cfg.scale];
            }
        }
        sprite
    }

    /// Zero the alpha byte outside the precomputed ellipse — circular
    /// loupe, not a square patch.
    fn apply_mask(&self, sprite: &mut FrameBuffer) {
        for (px, inside) in sprite.pixels.iter_mut().zip(&self.mask) {
            if !inside {
                *px &= 0x00FF_FFFF;
            }
        }
    }

    /// Center guide lines across the lens plus the cursor cross: white 8px
    /// strokes under black 4px strokes, readable on any background.
    fn decorate(&self, sprite: &mut FrameBuffer) {
        let cx = self.width as i32 / 2;
        let cy = self.height as i32 / 2;
        let w = self.width as i32;
        let h = self.height as i32;

        // Guide-colored lines spanning the lens (2px thick).
        paint_rect(sprite, 0, cy - 1, w, cy + 1, GUIDE_COLOR);
        paint_rect(sprite, cx - 1, 0, cx + 1, h, GUIDE_COLOR);

        // Cursor cross.
        paint_rect(sprite, cx - 30, cy - 4, cx + 30, cy + 4, WHITE);
        paint_rect(sprite, cx - 4, cy - 30, cx + 4, cy + 30, WHITE);
        paint_rect(sprite, cx - 28, cy - 2, cx + 28, cy + 2, BLACK);
        paint_rect(sprite, cx - 2, cy - 28, cx + 2, cy + 28, BLACK);
    }

    /// Top-left blit position: the lens center sits lens_offset away from
    /// the pointer, in the quadrant picked by the anchor, so the loupe
    /// never covers the pixels being selected.
    fn placement(&self, pointer: Point, anchor: Anchor) -> Point {
        let lens_offset = self.cfg.edge_offset + self.width as i32 / 2;
        let (sx, sy) = anchor.offset_signs();
        let center_x = pointer.x + sx * lens_offset;
        let center_y = pointer.y + sy * lens_offset;
        Point::new(center_x - self.width as i32 / 2, center_y - self.height as i32 / 2)
    }
}

/// Fill [x1,x2) × [y1,y2) on the sprite, clamped to its bounds, with full
/// alpha so decorations stay visible over the mask.
fn paint_rect(sprite: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: u32) {
    let x1 = x1.clamp(0, sprite.width as i32) as usize;
    let y1 = y1.clamp(0, sprite.height as i32) as usize;
    let x2 = x2.clamp(0, sprite.width as i32) as usize;
    let y2 = y2.clamp(0, sprite.height as i32) as usize;
    for y in y1..y2 {
        for x in x1..x2 {
            sprite.pixels[y * sprite.width + x] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: usize, height: usize, color: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for px in &mut fb.pixels {
            *px = color;
        }
        fb
    }

    #[test]
    fn sprite_dimensions_do_not_depend_on_pointer() {
        let lens = Lens::new(LensConfig::default());
        let frame = solid_frame(100, 80, 0xFF33_2211);
        for pointer in [
            Point::new(50, 40),
            Point::new(0, 0),
            Point::new(99, 79),
            Point::new(-500, -500),
            Point::new(10_000, 10_000),
        ] {
            let (sprite, _) = lens.render(&frame, pointer, Anchor::Se);
            assert_eq!((sprite.width, sprite.height), (150, 150));
        }
    }

    #[test]
    fn fully_out_of_frame_window_samples_only_sentinel() {
        let lens = Lens::new(LensConfig::default());
        let frame = solid_frame(100, 80, 0xFFAB_CDEF);
        let samples = lens.sample(&frame, Point::new(-1000, -1000));
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|&px| px == SENTINEL));
    }

    #[test]
    fn magnified_blocks_replicate_samples() {
        let cfg = LensConfig { sample_w: 2, sample_h: 2, scale: 3, ..LensConfig::default() };
        let lens = Lens::new(cfg);
        let sprite = lens.magnify(&[1, 2, 3, 4]);
        assert_eq!((sprite.width, sprite.height), (6, 6));
        // Top-left block comes from sample 0, bottom-right from sample 3.
        assert_eq!(sprite.pixels[0], 1);
        assert_eq!(sprite.pixels[2], 1);
        assert_eq!(sprite.pixels[5], 2);
        assert_eq!(sprite.pixels[5 * 6 + 5], 4);
    }

    #[test]
    fn mask_keeps_center_and_clears_corners() {
        let lens = Lens::new(LensConfig::default());
        let frame = solid_frame(100, 80, 0xFF77_7777);
        let (sprite, _) = lens.render(&frame, Point::new(50, 40), Anchor::Se);
        let w = sprite.width;
        // Corners lie outside the inscribed ellipse: alpha stripped.
        assert_eq!(sprite.pixels[0] >> 24, 0x00);
        assert_eq!(sprite.pixels[w - 1] >> 24, 0x00);
        assert_eq!(sprite.pixels[(sprite.height - 1) * w] >> 24, 0x00);
        // A point near the rim but inside keeps full alpha.
        assert_eq!(sprite.pixels[(sprite.height / 2) * w + 1] >> 24, 0xFF);
    }

    #[test]
    fn placement_follows_the_anchor_quadrant() {
        let lens = Lens::new(LensConfig::default());
        let (w, h) = lens.size();
        let pointer = Point::new(400, 300);
        let off = lens.config().edge_offset + w as i32 / 2;

        let tl = |center_x: i32, center_y: i32| {
            Point::new(center_x - w as i32 / 2, center_y - h as i32 / 2)
        };
        assert_eq!(lens.placement(pointer, Anchor::Se), tl(400 + off, 300 - off));
        assert_eq!(lens.placement(pointer, Anchor::Sw), tl(400 - off, 300 - off));
        assert_eq!(lens.placement(pointer, Anchor::Ne), tl(400 + off, 300 + off));
        assert_eq!(lens.placement(pointer, Anchor::Nw), tl(400 - off, 300 + off));
    }
}
