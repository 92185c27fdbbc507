use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::EpisodeError;

pub const EPISODE_EXTENSION: &str = ".mp3";

/// Next free episode number: one past the highest numbered `.mp3` file in the
/// archive, or 1 when the archive holds none.
pub fn next_episode_number(archive: &Path) -> Result<u32, EpisodeError> {
    let mut highest: u32 = 0;
    for entry in fs::read_dir(archive)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(EPISODE_EXTENSION) || !entry.path().is_file() {
            continue;
        }
        match episode_number_of(&name) {
            Ok(n) => highest = highest.max(n),
            Err(e) => warn!("Skipping {}: {}", name, e),
        }
    }
    debug!("Highest archived episode in {}: {}", archive.display(), highest);
    highest
        .checked_add(1)
        .ok_or(EpisodeError::EpisodeNumberOverflow(highest))
}

/// Numeric prefix before the first period of an archive file name.
pub fn episode_number_of(file_name: &str) -> Result<u32, EpisodeError> {
    file_name
        .split('.')
        .next()
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| EpisodeError::BadArchiveEntry(file_name.to_string()))
}

pub fn archived_file_name(number: u32) -> String {
    format!("{number}{EPISODE_EXTENSION}")
}

/// Move the audio file into the archive as `<number>.mp3`.
///
/// Falls back to copy and remove when the archive is on another filesystem.
pub fn move_into_archive(
    source: &Path,
    archive: &Path,
    number: u32,
) -> Result<PathBuf, EpisodeError> {
    let target = archive.join(archived_file_name(number));
    match fs::rename(source, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("rename across filesystems failed ({e}), copying instead");
            fs::copy(source, &target)?;
            fs::remove_file(source)?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(target)
}
