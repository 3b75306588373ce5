use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

mod app;
mod chart;
mod color;
mod config;
mod display;
mod form;
mod geometry;
mod interaction;
mod layout;
mod readout;
mod report;
mod state;
mod transition;

use chart::MarkerStyle;
use config::Config;
use display::DisplayMode;
use state::{AppState, Method};

#[derive(Parser, Debug)]
#[command(name = "vectorsum")]
#[command(author, version, about = "Interactive 2D vector addition with triangle and parallelogram methods")]
pub struct Args {
    /// Display mode: terminal or print
    #[arg(long, default_value = "terminal")]
    mode: DisplayMode,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of vectors (clamped to 2 or 3)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Composition method
    #[arg(short, long)]
    method: Option<Method>,

    /// Start with the resultant shown
    #[arg(short, long)]
    animate: bool,

    /// Color scheme: classic, spectrum, pastel, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Canvas marker style
    #[arg(long)]
    marker: Option<MarkerStyle>,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a default config file to the XDG config directory and exit
    #[arg(long)]
    init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive("vectorsum=info".parse()?);

    match (&args.log_file, args.mode) {
        (Some(path), _) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, DisplayMode::Print) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        // The terminal UI owns stdout/stderr
        (None, DisplayMode::Terminal) => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "vectorsum", &mut io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    init_logging(&args)?;

    info!("Starting vectorsum in {:?} mode", args.mode);

    // An explicit path must load; the default path is optional
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    match args.mode {
        DisplayMode::Terminal => display::terminal::run(config, args.animate)?,
        DisplayMode::Print => {
            let mut state = AppState::new(
                config.vectors.vector_set(),
                config.vectors.method,
                config.vectors.count,
            );
            if args.animate {
                state.animate();
            }
            let layout = layout::compute_layout(&state.vectors, &state.render);
            report::write_report(&mut io::stdout().lock(), &state, &layout)?;
        }
    }

    Ok(())
}
