//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "br";
const ORGANIZATION: &str = "cadastro";
const APPLICATION: &str = "cadastro";

/// Maximum number of archived logs to keep.
const MAX_OLD_LOGS: usize = 25;

/// Log file of the running process.
const LATEST_LOG: &str = "latest.log";

/// File-name prefix of archived logs.
const ARCHIVE_PREFIX: &str = "cadastro-";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs are written.
///
/// - Linux: `$XDG_CACHE_HOME/cadastro` or `~/.cache/cadastro`
/// - macOS: `~/Library/Caches/br.cadastro.cadastro`
/// - Windows: `C:\Users\<User>\AppData\Local\cadastro\cadastro\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/cadastro` or `~/.config/cadastro`
/// - macOS: `~/Library/Application Support/br.cadastro.cadastro`
/// - Windows: `C:\Users\<User>\AppData\Roaming\cadastro\cadastro\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the log file of the running process.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let _ = rotate(&cache, &stamp, MAX_OLD_LOGS);
}

/// Name of the archive for a run started at `stamp`.
fn archive_name(stamp: &str) -> String {
    format!("{ARCHIVE_PREFIX}{stamp}.log")
}

fn is_archive(name: &str) -> bool {
    name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log")
}

/// Moves `latest.log` in `dir` to its archive name and keeps only the `keep`
/// newest archives. Returns how many archives were removed.
///
/// Archive names embed a sortable timestamp, so name order is age order.
/// Files that are not cadastro archives are left alone.
fn rotate(dir: &Path, stamp: &str, keep: usize) -> io::Result<usize> {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        fs::rename(&latest, dir.join(archive_name(stamp)))?;
    }

    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_archive(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}
