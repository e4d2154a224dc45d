//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "typeahead";
const APPLICATION: &str = "typeahead";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs and other regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/typeahead` or `~/.cache/typeahead`
/// - macOS: `~/Library/Caches/dev.typeahead.typeahead`
/// - Windows: `C:\Users\<User>\AppData\Local\typeahead\typeahead\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default log file location, falling back to the working directory.
pub fn default_log_file() -> PathBuf {
    cache_dir()
        .map(|dir| dir.join("typeahead.log"))
        .unwrap_or_else(|| PathBuf::from("typeahead.log"))
}
