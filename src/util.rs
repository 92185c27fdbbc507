use std::path::Path;

use crate::error::EpisodeError;

/// Helper to convert a Path to &str, returning an error if not valid UTF-8.
pub fn path_to_str(path: &Path) -> Result<&str, EpisodeError> {
    path.to_str()
        .ok_or_else(|| EpisodeError::NonUtf8Path(path.to_path_buf()))
}

/// Human readable byte count in decimal megabytes, e.g. `12.3 MB`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
}
