// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),             // Creating the window failed
    WindowUpdate(String),           // Updating the window buffer failed
    Capture(String),                // Grabbing the frozen frame failed
    OutOfBounds { x: i32, y: i32 }, // Pixel read outside the frame
    Save(String),                   // Encoding or writing the selection failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Capture(s) => write!(f, "Screen capture error: {s}"),
            Error::OutOfBounds { x, y } => write!(f, "Pixel out of bounds: ({x}, {y})"),
            Error::Save(s) => write!(f, "Save error: {s}"),
        }
    }
}

// We don't implement std::error::Error for now to keep things minimal.
// It's easy to add later when we wire in more components.
