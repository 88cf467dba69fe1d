//! Where database files live.

use std::path::{Path, PathBuf};

/// Application directory name under the platform data directory.
pub const APP_DIR: &str = "moveboxtracker";

/// Explicit storage configuration passed to [`Store::open`](crate::Store::open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory that relative database names resolve into.
    pub data_home: PathBuf,
}

impl StoreConfig {
    pub fn new(data_home: impl Into<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
        }
    }

    /// Path of the database file for a user-supplied name.
    ///
    /// Absolute paths and paths that already exist relative to the working
    /// directory are used as given; anything else lands in the data home.
    pub fn resolve_db_path(&self, name: &Path) -> PathBuf {
        if name.is_absolute() || name.exists() {
            name.to_path_buf()
        } else {
            self.data_home.join(name)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(default_data_home())
    }
}

/// Platform data directory for the application, e.g.
/// `~/.local/share/moveboxtracker` on Linux.
pub fn default_data_home() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// The `<stem>-images` directory next to a database file.
pub fn image_dir_for(db_path: &Path) -> PathBuf {
    let stem = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    db_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{stem}-images"))
}
