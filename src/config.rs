// Last-save-directory cache: a single raw path string in ~/.loupeshot.
// No structured format, no escaping. A missing or unreadable file is not
// an error — the dialog just opens in the current directory.

use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".loupeshot";

fn config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Directory the save dialog should open in; "." when nothing was cached.
pub fn previous_path() -> PathBuf {
    config_file()
        .map(|file| read_cached(&file))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Cache the directory of a successful save for the next session.
/// Best-effort: the save itself already happened, so a write failure here
/// is not worth surfacing.
pub fn remember_path(dir: &Path) {
    if let Some(file) = config_file() {
        let _ = write_cached(&file, dir);
    }
}

fn read_cached(file: &Path) -> PathBuf {
    match fs::read_to_string(file) {
        Ok(contents) => PathBuf::from(contents.trim()),
        Err(_) => PathBuf::from("."),
    }
}

fn write_cached(file: &Path, dir: &Path) -> std::io::Result<()> {
    fs::write(file, dir.to_string_lossy().as_bytes())
}
