//! Terminal browser for generated documentation outlines.

mod app;
mod buffer;
mod error;
mod paths;
mod slide;
mod surface;
mod terminal;
mod theme;
mod view;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueHint};
use navtree::{CatalogStore, NavTree, NavTreeConfig};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::error::AppError;
use crate::slide::Easing;
use crate::surface::TermSurface;
use crate::terminal::Terminal;

/// Browse a documentation outline (navtree.js or JSON) in the terminal
#[derive(Parser, Debug)]
#[command(name = "navtree-term")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog file: a generated navtree.js script or a JSON entry list
    #[arg(value_hint = ValueHint::FilePath)]
    catalog: PathBuf,

    /// Link to reveal on start (default: the configured default target)
    #[arg(short, long)]
    target: Option<String>,

    /// Config file (default: <config dir>/config.json)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Log file (default: <cache dir>/latest.log)
    #[arg(long, value_hint = ValueHint::FilePath)]
    log_file: Option<PathBuf>,

    /// Log at trace level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let config = match cli.config.clone().or_else(paths::config_file) {
        Some(path) => NavTreeConfig::load(path)?,
        None => NavTreeConfig::default(),
    };
    let store = CatalogStore::load(&cli.catalog)?;
    log::info!(
        "Loaded {} entries from {}",
        store.len(),
        cli.catalog.display()
    );

    let target = cli
        .target
        .or_else(|| config.default_target.clone())
        .unwrap_or_default();
    let title = cli
        .catalog
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.catalog.display().to_string());
    let base_dir = cli
        .catalog
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut terminal = Terminal::new()?;
    let (width, height) = terminal.size();
    let mut app = App::new(
        NavTree::new(store, config),
        TermSurface::new(width, height).with_easing(Easing::EaseInOut),
        title,
        base_dir,
    );
    app.start(&target);
    app.run(&mut terminal)
}

/// Log to a file, never to the terminal being drawn on.
///
/// Without `--log-file` the previous session's log is rotated first. If no
/// cache directory can be found, logging is off.
fn init_logging(log_file: Option<&Path>, verbose: bool) -> Result<(), AppError> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => {
            paths::rotate_logs();
            let Some(path) = paths::log_file() else {
                return Ok(());
            };
            path
        }
    };

    let file = create_log_file(&path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;
    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    WriteLogger::init(level, Config::default(), file)?;
    log::debug!("Logging to {}", path.display());
    Ok(())
}

fn create_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}
