// Core types shared by every module: the pixel buffer, screen points,
// normalized selection rectangles and the lens anchor quadrant.

use crate::error::Error;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // frame width in pixels
    pub height: usize,     // frame height in pixels
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB; the alpha byte only matters for lens sprites
}

impl FrameBuffer {
    /// A zeroed (black, fully transparent) buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Stored pixel at (x, y), or `OutOfBounds` when the coordinate lies
    /// outside [0,width) × [0,height).
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u32, Error> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(self.pixels[y as usize * self.width + x as usize])
    }

    /// Copy of the pixels inside `rect` (half-open, clamped to the frame).
    /// Visual: this is exactly the image that ends up in the saved file.
    pub fn crop(&self, rect: Rect) -> FrameBuffer {
        let x1 = rect.x1.clamp(0, self.width as i32);
        let y1 = rect.y1.clamp(0, self.height as i32);
        let x2 = rect.x2.clamp(0, self.width as i32);
        let y2 = rect.y2.clamp(0, self.height as i32);

        let w = (x2 - x1) as usize;
        let h = (y2 - y1) as usize;
        let mut pixels = Vec::with_capacity(w * h);
        for y in y1..y2 {
            let row = y as usize * self.width;
            pixels.extend_from_slice(&self.pixels[row + x1 as usize..row + x2 as usize]);
        }
        FrameBuffer { width: w, height: h, pixels }
    }
}

/// An (x, y) pair in frame/screen coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A normalized rectangle: x1 ≤ x2 and y1 ≤ y2 always hold, because the only
/// way to build one is `normalize`, which min/max-orders two raw corners.
/// The selection is half-open: [x1, x2) × [y1, y2).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Order two raw drag corners into a valid rectangle.
    pub fn normalize(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// True when the selection covers no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Which quadrant the lens is offset toward, so the loupe stays clear of the
/// pixels the user is working on. Derived from the sign of the pointer delta
/// relative to the drag start; zero delta on an axis counts as positive, so
/// the no-movement default is `Se`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Anchor {
    Ne,
    Nw,
    Se,
    Sw,
}

impl Anchor {
    /// Pure sign function of (cur − start); each of the four sign
    /// combinations maps to exactly one quadrant.
    pub fn from_drag(start: Point, cur: Point) -> Self {
        match (cur.y < start.y, cur.x < start.x) {
            (false, false) => Anchor::Se,
            (false, true) => Anchor::Sw,
            (true, false) => Anchor::Ne,
            (true, true) => Anchor::Nw,
        }
    }

    /// Signs applied to the lens offset: east quadrants push the lens right,
    /// south quadrants push it up (away from the downward drag), and so on.
    pub fn offset_signs(self) -> (i32, i32) {
        let sx = match self {
            Anchor::Ne | Anchor::Se => 1,
            Anchor::Nw | Anchor::Sw => -1,
        };
        let sy = match self {
            Anchor::Sw | Anchor::Se => -1,
            Anchor::Ne | Anchor::Nw => 1,
        };
        (sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: usize, height: usize) -> FrameBuffer {
        // Deterministic pixel values so crops can be checked exactly.
        let mut fb = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                fb.pixels[y * width + x] = (y * width + x) as u32;
            }
        }
        fb
    }

    #[test]
    fn normalize_orders_corners() {
        let r = Rect::normalize(Point::new(300, 100), Point::new(100, 250));
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (100, 100, 300, 250));
        assert!(r.x1 <= r.x2 && r.y1 <= r.y2);
    }

    #[test]
    fn normalize_is_idempotent() {
        let r = Rect::normalize(Point::new(7, 40), Point::new(-3, 2));
        let again = Rect::normalize(Point::new(r.x1, r.y1), Point::new(r.x2, r.y2));
        assert_eq!(r, again);
    }

    #[test]
    fn anchor_covers_all_sign_combinations() {
        let start = Point::new(10, 10);
        assert_eq!(Anchor::from_drag(start, Point::new(20, 20)), Anchor::Se);
        assert_eq!(Anchor::from_drag(start, Point::new(0, 20)), Anchor::Sw);
        assert_eq!(Anchor::from_drag(start, Point::new(20, 0)), Anchor::Ne);
        assert_eq!(Anchor::from_drag(start, Point::new(0, 0)), Anchor::Nw);
    }

    #[test]
    fn anchor_zero_delta_defaults_south_east() {
        let p = Point::new(5, 5);
        assert_eq!(Anchor::from_drag(p, p), Anchor::Se);
    }

    #[test]
    fn get_pixel_rejects_out_of_bounds() {
        let fb = checker(4, 3);
        assert!(fb.get_pixel(0, 0).is_ok());
        assert!(fb.get_pixel(3, 2).is_ok());
        assert!(fb.get_pixel(4, 0).is_err());
        assert!(fb.get_pixel(0, 3).is_err());
        assert!(fb.get_pixel(-1, 0).is_err());
    }

    #[test]
    fn crop_matches_get_pixel() {
        let fb = checker(16, 12);
        let rect = Rect::normalize(Point::new(3, 2), Point::new(9, 7));
        let cropped = fb.crop(rect);
        assert_eq!((cropped.width, cropped.height), (6, 5));
        for y in 0..5i32 {
            for x in 0..6i32 {
                assert_eq!(
                    cropped.get_pixel(x, y).unwrap(),
                    fb.get_pixel(x + 3, y + 2).unwrap()
                );
            }
        }
    }

    #[test]
    fn crop_clamps_to_frame() {
        let fb = checker(8, 8);
        let rect = Rect::normalize(Point::new(-5, 4), Point::new(20, 20));
        let cropped = fb.crop(rect);
        assert_eq!((cropped.width, cropped.height), (8, 4));
        assert_eq!(cropped.get_pixel(0, 0).unwrap(), fb.get_pixel(0, 4).unwrap());
    }

    #[test]
    fn zero_area_rect_is_empty() {
        let p = Point::new(50, 50);
        let r = Rect::normalize(p, p);
        assert!(r.is_empty());
        assert_eq!((r.width(), r.height()), (0, 0));
    }
}
