// Save-path dialog and image encoding for the cropped selection.
// The dialog is modal and blocks the event loop until resolved; a `None`
// result means the user cancelled, which is a normal outcome.

use crate::config;
use crate::error::Error;
use crate::types::FrameBuffer;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Ask the user where to put the capture, starting from the last-used
/// directory.
pub fn prompt_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select file")
        .add_filter("png files", &["png"])
        .add_filter("all files", &["*"])
        .set_directory(config::previous_path())
        .set_file_name("capture.png")
        .save_file()
}

/// Encode the cropped buffer and write it to `path`. The format follows
/// the chosen extension (PNG by default).
pub fn save_image(frame: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let mut img = RgbImage::new(frame.width as u32, frame.height as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let v = frame.pixels[y as usize * frame.width + x as usize];
        *px = image::Rgb([
            ((v >> 16) & 0xFF) as u8,
            ((v >> 8) & 0xFF) as u8,
            (v & 0xFF) as u8,
        ]);
    }
    img.save(path)
        .map_err(|e| Error::Save(format!("Write {}: {e}", path.display())))
}
