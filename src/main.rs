mod app;
mod archive;
mod cli;
mod config;
mod duration;
mod error;
mod feed;
mod ffprobe;
mod tagger;
mod util;
mod validate;

use std::{io, process::ExitCode};

use clap::Parser;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::init_log(&args);

    let result = app::run(args);
    ExitCode::from(app::report(&result, &mut io::stdout().lock()))
}
