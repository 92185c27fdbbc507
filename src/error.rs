use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Category of a failure, reported to the user and mapped to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    FileNotFound,
    Format,
    Size,
    Io,
}

impl ErrorKind {
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::Argument => 2,
            ErrorKind::FileNotFound => 3,
            ErrorKind::Format => 4,
            ErrorKind::Size => 5,
            ErrorKind::Io => 6,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Argument => "ArgumentError",
            ErrorKind::FileNotFound => "FileNotFoundError",
            ErrorKind::Format => "FormatError",
            ErrorKind::Size => "SizeError",
            ErrorKind::Io => "IOError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Wrong number of arguments (expected {expected}, got {found})")]
    ArgumentCount { expected: usize, found: usize },
    #[error("Title should not contain episode number")]
    NumberedTitle,
    #[error("File {} does not exist", .0.display())]
    AudioNotFound(PathBuf),
    #[error("Cover image {} does not exist", .0.display())]
    ImageNotFound(PathBuf),
    #[error("Cover image {0} is not a valid image file")]
    InvalidImageType(String),
    #[error("File {} is not an mp3 file", .0.display())]
    NotMp3(PathBuf),
    #[error("Archive entry {0} has no numeric episode prefix")]
    BadArchiveEntry(String),
    #[error("No episode number left after {0}")]
    EpisodeNumberOverflow(u32),
    #[error("File is too large (>{limit_mb}MB)")]
    TooLarge { limit_mb: u64 },
    #[error(
        "File is too large (>{limit_mb}MB) and has a very high bitrate ({bitrate_kbps:.1}), try lowering it\neg. 'lame -b {max_kbps} {} smaller-file.mp3'",
        .path.display()
    )]
    TooLargeHighBitrate {
        path: PathBuf,
        limit_mb: u64,
        bitrate_kbps: f64,
        max_kbps: u64,
    },
    #[error("Could not determine the duration of {}", .0.display())]
    DurationUndetermined(PathBuf),
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    CommandNotFound(String),
    #[error("Failed to run `{0}`: {1}")]
    CommandFailed(String, String),
    #[error("Invalid path (not UTF-8): {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tag(#[from] id3::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl EpisodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EpisodeError::ArgumentCount { .. } | EpisodeError::NumberedTitle => {
                ErrorKind::Argument
            }
            EpisodeError::AudioNotFound(_)
            | EpisodeError::ImageNotFound(_)
            | EpisodeError::CommandNotFound(_) => ErrorKind::FileNotFound,
            EpisodeError::InvalidImageType(_)
            | EpisodeError::NotMp3(_)
            | EpisodeError::BadArchiveEntry(_)
            | EpisodeError::EpisodeNumberOverflow(_)
            | EpisodeError::NonUtf8Path(_)
            | EpisodeError::Regex(_) => ErrorKind::Format,
            EpisodeError::TooLarge { .. } | EpisodeError::TooLargeHighBitrate { .. } => {
                ErrorKind::Size
            }
            EpisodeError::DurationUndetermined(_)
            | EpisodeError::CommandFailed(..)
            | EpisodeError::Io(_)
            | EpisodeError::Tag(_)
            | EpisodeError::SerdeJson(_) => ErrorKind::Io,
        }
    }
}

/// Finds the most specific kind in an error chain, defaulting to IOError.
pub fn kind_of(err: &anyhow::Error) -> ErrorKind {
    err.chain()
        .find_map(|e| e.downcast_ref::<EpisodeError>())
        .map_or(ErrorKind::Io, EpisodeError::kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn kinds_are_named_like_the_abort_line_expects() {
        assert_eq!(ErrorKind::Argument.to_string(), "ArgumentError");
        assert_eq!(ErrorKind::Io.to_string(), "IOError");
        assert_eq!(
            EpisodeError::ArgumentCount {
                expected: 5,
                found: 2
            }
            .kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn exit_codes_follow_kind() {
        let codes: Vec<u8> = [
            ErrorKind::Argument,
            ErrorKind::FileNotFound,
            ErrorKind::Format,
            ErrorKind::Size,
            ErrorKind::Io,
        ]
        .into_iter()
        .map(ErrorKind::code)
        .collect();
        assert_eq!(codes, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn high_bitrate_message_suggests_reencode() {
        let err = EpisodeError::TooLargeHighBitrate {
            path: PathBuf::from("big.mp3"),
            limit_mb: 100,
            bitrate_kbps: 250.0,
            max_kbps: 192,
        };
        let msg = err.to_string();
        assert!(msg.contains("very high bitrate (250.0), try lowering it\n"), "{msg}");
        assert!(msg.contains("\neg. 'lame -b 192 big.mp3 smaller-file.mp3'"), "{msg}");
        assert_eq!(err.kind(), ErrorKind::Size);
    }

    #[test]
    fn kind_survives_context_wrapping() {
        let err = Err::<(), _>(EpisodeError::NotMp3(PathBuf::from("a.wav")))
            .context("validating audio")
            .unwrap_err();
        assert_eq!(kind_of(&err), ErrorKind::Format);

        let plain = anyhow::anyhow!("something else");
        assert_eq!(kind_of(&plain), ErrorKind::Io);
    }
}
