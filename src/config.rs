use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::cli::Args;

pub const DEFAULT_EPISODES_DIR: &str = "episodes";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_BASE_URL: &str = "https://dsek-lth.github.io/podcast/";
pub const DEFAULT_ARTIST: &str = "D-sektionen";

/// Values read from a `--config` JSON file. Every field is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub episodes_dir: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub artist: Option<String>,
}

impl ConfigFile {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Option<Self>> {
        if let Some(path) = path {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            let config: ConfigFile = serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            Ok(Some(config))
        } else {
            Ok(None)
        }
    }
}

/// Resolved settings: command line first, then config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub episodes_dir: PathBuf,
    pub images_dir: PathBuf,
    pub base_url: String,
    pub artist: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            episodes_dir: PathBuf::from(DEFAULT_EPISODES_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            base_url: DEFAULT_BASE_URL.to_string(),
            artist: DEFAULT_ARTIST.to_string(),
        }
    }
}

impl Settings {
    pub fn resolve(args: &Args, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Settings::default();
        let mut base_url = args
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or(defaults.base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Settings {
            episodes_dir: args
                .episodes_dir
                .clone()
                .or(file.episodes_dir)
                .unwrap_or(defaults.episodes_dir),
            images_dir: args
                .images_dir
                .clone()
                .or(file.images_dir)
                .unwrap_or(defaults.images_dir),
            base_url,
            artist: args
                .artist
                .clone()
                .or(file.artist)
                .unwrap_or(defaults.artist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let args = Args::parse_from(["new-episode"]);
        assert_eq!(Settings::resolve(&args, None), Settings::default());
    }

    #[test]
    fn cli_overrides_file_and_file_overrides_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{"episodes_dir": "/data/eps", "base_url": "https://example.org/pod", "artist": "Club"}}"#
        )
        .unwrap();

        let file = ConfigFile::load(Some(tmp.path())).unwrap();
        let args = Args::parse_from(["new-episode", "--artist", "Radio"]);
        let settings = Settings::resolve(&args, file);

        assert_eq!(settings.episodes_dir, PathBuf::from("/data/eps"));
        assert_eq!(settings.images_dir, PathBuf::from(DEFAULT_IMAGES_DIR));
        assert_eq!(settings.base_url, "https://example.org/pod/");
        assert_eq!(settings.artist, "Radio");
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"episode_dir": "typo"}}"#).unwrap();
        assert!(ConfigFile::load(Some(tmp.path())).is_err());
    }
}
