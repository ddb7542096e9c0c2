use std::io;
use std::path::PathBuf;

use navtree::{CatalogError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
