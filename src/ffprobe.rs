use std::{
    io,
    path::Path,
    process::{Command, Stdio},
};

use log::debug;

use crate::{error::EpisodeError, util::path_to_str};

/// Stream properties of an audio file as reported by ffprobe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    /// Length in seconds.
    pub duration_secs: f64,
    /// Declared average bitrate in bits per second.
    pub bitrate_bps: Option<u64>,
}

impl AudioInfo {
    pub fn bitrate_kbps(&self) -> Option<f64> {
        self.bitrate_bps.map(|bps| bps as f64 / 1000.0)
    }
}

/// Source of stream properties for an audio file.
pub trait AudioProbe {
    /// Fails when the probe cannot run at all, e.g. a missing tool.
    fn check_available(&self) -> Result<(), EpisodeError> {
        Ok(())
    }

    fn probe(&self, path: &Path) -> Result<AudioInfo, EpisodeError>;
}

/// Probes files by running `ffprobe` from `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ffprobe;

impl AudioProbe for Ffprobe {
    fn check_available(&self) -> Result<(), EpisodeError> {
        check_dependency("ffprobe")
    }

    fn probe(&self, path: &Path) -> Result<AudioInfo, EpisodeError> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-select_streams",
                "a:0",
                "-show_entries",
                "stream=duration,bit_rate:format=duration,bit_rate",
                "-of",
                "json",
                path_to_str(path)?,
            ])
            .output()
            .map_err(|e| not_found_or_failed("ffprobe", e))?;

        if !output.status.success() {
            return Err(EpisodeError::CommandFailed(
                "ffprobe".to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        debug!(
            "ffprobe output for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stdout)
        );
        parse_probe_output(path, &output.stdout)
    }
}

/// Extract duration and bitrate from ffprobe's JSON, preferring the audio
/// stream and falling back to the container.
pub fn parse_probe_output(path: &Path, json: &[u8]) -> Result<AudioInfo, EpisodeError> {
    let parsed: serde_json::Value = serde_json::from_slice(json)?;
    let stream = parsed["streams"]
        .as_array()
        .and_then(|streams| streams.first());
    let format = &parsed["format"];

    let duration_secs = probe_field(stream, format, "duration")
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| EpisodeError::DurationUndetermined(path.to_path_buf()))?;
    let bitrate_bps = probe_field(stream, format, "bit_rate")
        .and_then(|b| b.parse::<u64>().ok())
        .filter(|b| *b > 0);

    Ok(AudioInfo {
        duration_secs,
        bitrate_bps,
    })
}

fn probe_field<'a>(
    stream: Option<&'a serde_json::Value>,
    format: &'a serde_json::Value,
    name: &str,
) -> Option<&'a str> {
    stream
        .and_then(|s| s[name].as_str())
        .filter(|v| *v != "N/A")
        .or_else(|| format[name].as_str())
}

pub fn check_dependency(cmd: &str) -> Result<(), EpisodeError> {
    Command::new(cmd)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|_| ())
        .map_err(|e| not_found_or_failed(cmd, e))
}

fn not_found_or_failed(cmd: &str, e: io::Error) -> EpisodeError {
    if e.kind() == io::ErrorKind::NotFound {
        EpisodeError::CommandNotFound(cmd.to_string())
    } else {
        EpisodeError::CommandFailed(cmd.to_string(), e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_values_win_over_container() {
        let json = br#"{
            "programs": [],
            "streams": [{"duration": "1834.213878", "bit_rate": "128000"}],
            "format": {"duration": "1834.250000", "bit_rate": "128456"}
        }"#;
        let info = parse_probe_output(Path::new("ep.mp3"), json).unwrap();
        assert_eq!(info.duration_secs, 1834.213878);
        assert_eq!(info.bitrate_bps, Some(128_000));
        assert_eq!(info.bitrate_kbps(), Some(128.0));
    }

    #[test]
    fn falls_back_to_container_values() {
        let json = br#"{
            "streams": [{"duration": "N/A"}],
            "format": {"duration": "61.5", "bit_rate": "256000"}
        }"#;
        let info = parse_probe_output(Path::new("ep.mp3"), json).unwrap();
        assert_eq!(info.duration_secs, 61.5);
        assert_eq!(info.bitrate_bps, Some(256_000));
    }

    #[test]
    fn missing_duration_is_an_error() {
        let json = br#"{"streams": [], "format": {}}"#;
        let err = parse_probe_output(Path::new("ep.mp3"), json).unwrap_err();
        assert!(matches!(err, EpisodeError::DurationUndetermined(_)));
    }

    #[test]
    fn missing_bitrate_is_allowed() {
        let json = br#"{"format": {"duration": "10.0"}}"#;
        let info = parse_probe_output(Path::new("ep.mp3"), json).unwrap();
        assert_eq!(info.bitrate_bps, None);
    }
}
