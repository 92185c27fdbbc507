use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, Utc};
use comfy_table::{Table, presets::UTF8_FULL};
use log::{error, info};

use crate::{
    archive::{archived_file_name, move_into_archive, next_episode_number},
    cli::{Args, USAGE},
    config::{ConfigFile, Settings},
    duration::format_duration,
    error::{EpisodeError, kind_of},
    feed::{FeedItem, render_fragment},
    ffprobe::{AudioProbe, Ffprobe},
    tagger::{EpisodeTags, write_tags},
    util::format_megabytes,
    validate::{validate_arguments, validate_file},
};

/// Outcome of a successful publish.
#[derive(Debug)]
pub struct Published {
    pub number: u32,
    pub archived_path: PathBuf,
}

pub fn run(args: Args) -> Result<()> {
    let config = ConfigFile::load(args.config.as_deref())?;
    let settings = Settings::resolve(&args, config);
    info!("Using settings {:?}", settings);

    let published = publish(
        &args.positional,
        &settings,
        &Ffprobe,
        Local::now().year(),
        Utc::now(),
        &mut io::stdout().lock(),
    )?;
    info!(
        "Episode {} archived at {}",
        published.number,
        published.archived_path.display()
    );
    Ok(())
}

/// Print the final status line, or the abort line and usage banner, and
/// return the process exit code.
pub fn report(result: &Result<()>, out: &mut dyn Write) -> u8 {
    let (code, written) = match result {
        Ok(()) => (0, writeln!(out, "Done")),
        Err(e) => {
            let kind = kind_of(e);
            (
                kind.code(),
                writeln!(out, "Aborting due to {kind}: {e:#}\n\nUsage:\n  {USAGE}\n"),
            )
        }
    };
    if let Err(e) = written {
        error!("Could not write final status: {e}");
    }
    code
}

/// Validate, number, tag and archive one episode, writing progress and its
/// feed fragment to `out`.
///
/// Tags are written to the file where it lies; the fragment already points at
/// the archived name. A failed move leaves the tagged file in place.
pub fn publish(
    positional: &[String],
    settings: &Settings,
    probe: &dyn AudioProbe,
    year: i32,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<Published, EpisodeError> {
    let episode = validate_arguments(positional, settings)?;
    probe.check_available()?;
    let number = next_episode_number(&settings.episodes_dir)?;
    writeln!(out, "ℹ️ Next episode number: {}", number)?;

    validate_file(&episode.audio_path, probe)?;

    let tags = EpisodeTags::new(number, &episode.title, &settings.artist, year);
    write_tags(&episode.audio_path, &tags)?;
    writeln!(out, "✅ Tagged {}", episode.audio_path.display())?;

    let audio = probe.probe(&episode.audio_path)?;
    let duration = format_duration(audio.duration_secs);
    let size_bytes = fs::metadata(&episode.audio_path)?.len();
    let archived_name = archived_file_name(number);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Parameter", "Value"]);
    table
        .add_row(vec!["Episode", &number.to_string()])
        .add_row(vec!["Title", &tags.title])
        .add_row(vec!["Author", &episode.author])
        .add_row(vec!["Artist", &tags.artist])
        .add_row(vec!["Year", &tags.year.to_string()])
        .add_row(vec!["Duration", &duration])
        .add_row(vec!["Size", &format_megabytes(size_bytes)])
        .add_row(vec![
            "Bitrate",
            &audio
                .bitrate_kbps()
                .map(|kbps| format!("{kbps} kbps"))
                .unwrap_or_else(|| "unknown".to_string()),
        ])
        .add_row(vec!["Cover Image", &episode.image_name])
        .add_row(vec![
            "Archive Path",
            &settings
                .episodes_dir
                .join(&archived_name)
                .display()
                .to_string(),
        ]);
    writeln!(out, "\n▶️ Episode Details:")?;
    writeln!(out, "{table}\n")?;

    let item = FeedItem {
        title: &tags.title,
        description: &episode.description,
        author: &episode.author,
        duration: &duration,
        size_bytes,
        image_name: &episode.image_name,
        archived_name: &archived_name,
    };
    let fragment = render_fragment(&item, &settings.base_url, now);
    writeln!(out, "{fragment}\n")?;

    let archived_path = move_into_archive(&episode.audio_path, &settings.episodes_dir, number)?;
    writeln!(out, "✅ Moved to {}", archived_path.display())?;

    Ok(Published {
        number,
        archived_path,
    })
}
