//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "navtree";
const APPLICATION: &str = "navtree";

/// Name of the log file written by the running session.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, home of the logs.
///
/// - Linux: `$XDG_CACHE_HOME/navtree` or `~/.cache/navtree`
/// - macOS: `~/Library/Caches/dev.navtree.navtree`
/// - Windows: `C:\Users\<User>\AppData\Local\navtree\navtree\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/navtree` or `~/.config/navtree`
/// - macOS: `~/Library/Application Support/dev.navtree.navtree`
/// - Windows: `C:\Users\<User>\AppData\Roaming\navtree\navtree\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path of the current session's log.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Rename latest.log to a timestamped name and drop the oldest archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{timestamp}.log"));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(&cache, MAX_OLD_LOGS);
}

/// Remove archived logs in `dir`, keeping the `keep` most recent.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; equal times fall back to the timestamped name.
    logs.sort_by_key(|e| (e.metadata().and_then(|m| m.modified()).ok(), e.file_name()));

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            log::trace!("Removing old log {}", entry.path().display());
            let _ = fs::remove_file(entry.path());
        }
    }
}
