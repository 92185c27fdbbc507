use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use regex::Regex;

use crate::{config::Settings, error::EpisodeError, ffprobe::AudioProbe};

pub const ARGUMENT_COUNT: usize = 5;
pub const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];
/// 100 MB
pub const MAX_FILE_SIZE: u64 = 100_000_000;
pub const MAX_BITRATE_KBPS: u64 = 192;

/// The five positional inputs after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeArgs {
    pub audio_path: PathBuf,
    pub image_name: String,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Check the positional arguments: count, audio file, cover image and title.
pub fn validate_arguments(
    positional: &[String],
    settings: &Settings,
) -> Result<EpisodeArgs, EpisodeError> {
    let [audio, image, title, author, description] = positional else {
        return Err(EpisodeError::ArgumentCount {
            expected: ARGUMENT_COUNT,
            found: positional.len(),
        });
    };

    let audio_path = PathBuf::from(audio);
    if !audio_path.is_file() {
        return Err(EpisodeError::AudioNotFound(audio_path));
    }

    let image_path = settings.images_dir.join(image);
    if !image_path.is_file() {
        return Err(EpisodeError::ImageNotFound(image_path));
    }

    let lower = image.to_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(EpisodeError::InvalidImageType(image.clone()));
    }

    // "3. Title" would be numbered twice once the episode number is prepended
    let numbered = Regex::new(r"^\d+\. .*$")?;
    if numbered.is_match(title) {
        return Err(EpisodeError::NumberedTitle);
    }

    debug!("Arguments valid: audio {}, image {}", audio, image);
    Ok(EpisodeArgs {
        audio_path,
        image_name: image.clone(),
        title: title.clone(),
        author: author.clone(),
        description: description.clone(),
    })
}

/// Check that the audio file is an mp3 within the size limit. Returns its size in bytes.
///
/// The bitrate is only probed for oversized files, where it decides which advice is given.
pub fn validate_file(path: &Path, probe: &dyn AudioProbe) -> Result<u64, EpisodeError> {
    if !path.as_os_str().to_string_lossy().ends_with(".mp3") {
        return Err(EpisodeError::NotMp3(path.to_path_buf()));
    }

    let size = fs::metadata(path)?.len();
    let bitrate_kbps = if size > MAX_FILE_SIZE {
        probe.probe(path)?.bitrate_kbps()
    } else {
        None
    };
    check_size_policy(path, size, bitrate_kbps)?;

    info!("{} is a valid mp3 of {} bytes", path.display(), size);
    Ok(size)
}

/// Size decides rejection; a high bitrate only adds a re-encoding hint.
pub fn check_size_policy(
    path: &Path,
    size: u64,
    bitrate_kbps: Option<f64>,
) -> Result<(), EpisodeError> {
    if size <= MAX_FILE_SIZE {
        return Ok(());
    }
    let limit_mb = MAX_FILE_SIZE / 1_000_000;
    match bitrate_kbps {
        Some(kbps) if kbps > MAX_BITRATE_KBPS as f64 => Err(EpisodeError::TooLargeHighBitrate {
            path: path.to_path_buf(),
            limit_mb,
            bitrate_kbps: kbps,
            max_kbps: MAX_BITRATE_KBPS,
        }),
        _ => Err(EpisodeError::TooLarge { limit_mb }),
    }
}
