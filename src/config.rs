//! Runtime configuration
//!
//! Everything comes from the environment; there is no config file.

use std::path::{Path, PathBuf};

/// Overrides the SQLite database location
pub const DATABASE_PATH_ENV: &str = "NUTRISNAP_DATABASE_PATH";

/// Log directive appended to `RUST_LOG`
pub const DEFAULT_LOG_DIRECTIVE: &str = "nutrisnap=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());
        Self { database_path }
    }
}

/// `data/nutrisnap.db` beside the executable, or beside the project root when
/// running out of `target/debug` or `target/release`
fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    database_path_for(&exe_dir)
}

fn database_path_for(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(project_root) = path.parent().and_then(Path::parent) {
            path = project_root.to_path_buf();
        }
    }

    path.push("data");
    path.push("nutrisnap.db");
    path
}
