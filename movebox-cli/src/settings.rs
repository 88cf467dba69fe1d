//! User settings (data home, default label layout).
//!
//! The settings file is `~/.config/moveboxtracker/settings.toml` (platform
//! config directory). Data home resolution follows a priority chain so the
//! flag, environment and file can each override what comes after.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use movebox_db::config::{default_data_home, APP_DIR};
use movebox_model::LabelKind;
use serde::Deserialize;

/// Environment variable overriding the saved data home.
pub(crate) const DATA_HOME_ENV: &str = "MBT_DATA_HOME";

/// Values read from `settings.toml`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    pub data_home: Option<PathBuf>,
    pub default_label: Option<LabelKind>,
}

/// Where the effective data home came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataHomeSource {
    Flag,
    Env,
    SettingsFile,
    Default,
}

impl fmt::Display for DataHomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "--data-home",
            Self::Env => DATA_HOME_ENV,
            Self::SettingsFile => "settings file",
            Self::Default => "default",
        })
    }
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

/// Load settings from `path`. A missing file yields defaults; a malformed
/// one is an error so typos are not silently ignored.
pub(crate) fn load_settings(path: &Path) -> io::Result<Settings> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e),
    }
}

/// Resolve the data home using a priority chain:
///
/// 1. `--data-home` flag
/// 2. `MBT_DATA_HOME` environment variable
/// 3. `data_home` in `settings.toml`
/// 4. Platform data directory
pub(crate) fn resolve_data_home(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    settings: &Settings,
) -> (PathBuf, DataHomeSource) {
    if let Some(p) = flag {
        return (p, DataHomeSource::Flag);
    }
    if let Some(p) = env.filter(|p| !p.as_os_str().is_empty()) {
        return (p, DataHomeSource::Env);
    }
    if let Some(p) = settings.data_home.clone() {
        return (p, DataHomeSource::SettingsFile);
    }
    (default_data_home(), DataHomeSource::Default)
}

pub(crate) fn env_data_home() -> Option<PathBuf> {
    std::env::var_os(DATA_HOME_ENV).map(PathBuf::from)
}

/// Save the data home in the settings file at `path`.
///
/// Uses `toml::Value` for a surgical update so other keys are preserved.
/// A malformed existing file is an error and is left untouched.
pub(crate) fn save_data_home(path: &Path, data_home: &Path) -> io::Result<()> {
    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents.parse().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("{}: {e}", path.display()))
        })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Value::Table(Default::default()),
        Err(e) => return Err(e),
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    table.insert(
        "data_home".to_string(),
        toml::Value::String(data_home.to_string_lossy().into_owned()),
    );

    // Write atomically
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}
