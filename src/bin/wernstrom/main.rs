//! wernstrom - terminal front end for the finger-played synth
//!
//! Run with: cargo run -- [--config synth.json] [--log-file wernstrom.log] [-vv]

mod app;
mod control;
mod ui;

use std::{fs::File, path::PathBuf};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use structopt::StructOpt;
use wernstrom::SynthConfig;

#[derive(Debug, StructOpt)]
#[structopt(name = "wernstrom", about = "Play the voice-gate synth from a terminal")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// JSON session config; missing fields keep their defaults.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Write logs here. The terminal belongs to the UI, so without this
    /// only warnings and errors are kept, on stderr after exit.
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();

    init_logging(&opt)?;

    let config = match &opt.config {
        Some(path) => load_config(path)?,
        None => SynthConfig::default(),
    };
    log::info!("wernstrom starting: {:?}", config.scheduler);

    app::run(config)
}

fn init_logging(opt: &Opt) -> EyreResult<()> {
    let level = match opt.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.format_timestamp_millis();
    match &opt.log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder
                .filter_level(level)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

fn load_config(path: &PathBuf) -> EyreResult<SynthConfig> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("invalid config {}", path.display()))
}
