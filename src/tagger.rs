use std::path::Path;

use id3::{Tag, TagLike, Timestamp, Version};
use log::debug;

use crate::error::EpisodeError;

pub const GENRE: &str = "Podcast";

/// The four ID3 fields written for every episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeTags {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
}

impl EpisodeTags {
    pub fn new(number: u32, title: &str, artist: &str, year: i32) -> Self {
        EpisodeTags {
            title: numbered_title(number, title),
            artist: artist.to_string(),
            genre: GENRE.to_string(),
            year,
        }
    }
}

pub fn numbered_title(number: u32, title: &str) -> String {
    format!("{number}. {title}")
}

/// Set title, artist, genre and date on the file's ID3v2 tag, keeping any other frames.
pub fn write_tags(path: &Path, tags: &EpisodeTags) -> Result<(), EpisodeError> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => Tag::new(),
        Err(e) => return Err(e.into()),
    };

    tag.set_title(tags.title.as_str());
    tag.set_artist(tags.artist.as_str());
    tag.set_genre(tags.genre.as_str());
    tag.set_date_recorded(Timestamp {
        year: tags.year,
        month: None,
        day: None,
        hour: None,
        minute: None,
        second: None,
    });
    tag.write_to_path(path, Version::Id3v24)?;

    debug!("Wrote ID3 tags to {}: {:?}", path.display(), tags);
    Ok(())
}

/// Read back the fields set by [`write_tags`]. Missing text frames come back empty.
pub fn read_tags(path: &Path) -> Result<EpisodeTags, EpisodeError> {
    let tag = Tag::read_from_path(path)?;
    Ok(EpisodeTags {
        title: tag.title().unwrap_or_default().to_string(),
        artist: tag.artist().unwrap_or_default().to_string(),
        genre: tag.genre().unwrap_or_default().to_string(),
        year: tag.date_recorded().map_or(0, |ts| ts.year),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // An MPEG-1 Layer III frame header followed by padding stands in for audio.
    const FAKE_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn tags_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launch.mp3");
        fs::write(&path, FAKE_MP3).unwrap();

        let tags = EpisodeTags::new(7, "Launch", "D-sektionen", 2026);
        write_tags(&path, &tags).unwrap();

        let read = read_tags(&path).unwrap();
        assert_eq!(read, tags);
        assert_eq!(read.title, "7. Launch");
        assert_eq!(read.genre, "Podcast");
        assert!(fs::read(&path).unwrap().ends_with(FAKE_MP3));
    }

    #[test]
    fn retagging_replaces_fields_and_keeps_other_frames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launch.mp3");
        fs::write(&path, FAKE_MP3).unwrap();

        let mut existing = Tag::new();
        existing.set_title("raw export");
        existing.set_album("Season 1");
        existing.write_to_path(&path, Version::Id3v24).unwrap();

        write_tags(&path, &EpisodeTags::new(1, "Launch", "Team", 2025)).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.title(), Some("1. Launch"));
        assert_eq!(tag.album(), Some("Season 1"));
        assert_eq!(read_tags(&path).unwrap().year, 2025);
    }

    #[test]
    fn untagged_file_has_no_tags_to_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.mp3");
        fs::write(&path, FAKE_MP3).unwrap();
        assert!(matches!(read_tags(&path), Err(EpisodeError::Tag(_))));
    }
}
