use std::path::PathBuf;

use clap::Parser;

pub const USAGE: &str = "new-episode audio_file_path cover_image_name title author description";

/// Tag, number and archive a new podcast episode, then print its RSS item
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// audio_file_path cover_image_name title author description
    #[arg(value_name = "ARGS")]
    pub positional: Vec<String>,

    /// JSON file with archive/image directories, base URL and artist. Command line options override it.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Directory holding the numbered episode archive [default: episodes]
    #[arg(short = 'e', long)]
    pub episodes_dir: Option<PathBuf>,

    /// Directory the cover image must already exist in [default: images]
    #[arg(short = 'i', long)]
    pub images_dir: Option<PathBuf>,

    /// Public URL the feed, episodes and images are served under
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,

    /// Artist written into the ID3 tag
    #[arg(short = 'a', long)]
    pub artist: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Prepend log entries with a timestamp (none, sec, ms, us, ns)
    #[arg(long, value_name = "GRANULARITY", default_value = "none")]
    pub timestamp: stderrlog::Timestamp,
}

/// Initialize stderr logging from the command line flags.
pub fn init_log(args: &Args) {
    // warn by default
    let verbosity = 1 + usize::from(args.verbose);
    if let Err(e) = stderrlog::new()
        .quiet(args.quiet)
        .verbosity(verbosity)
        .timestamp(args.timestamp)
        .init()
    {
        eprintln!("Could not initialize logging: {e}");
    }
}
