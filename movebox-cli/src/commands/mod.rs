pub(crate) mod commit;
pub(crate) mod config;
pub(crate) mod dump;
pub(crate) mod init;
pub(crate) mod label;
pub(crate) mod list;
pub(crate) mod record;

use std::path::{Path, PathBuf};

use movebox_db::{Store, StoreConfig};

use crate::error::CliError;
use crate::settings::{DataHomeSource, Settings};
use crate::terminal::TerminalUi;

/// Settings resolved once at startup and shared by every command.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub data_home: PathBuf,
    pub data_home_source: DataHomeSource,
}

impl AppContext {
    pub(crate) fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_home)
    }

    /// Open a database with the terminal attached for prompting.
    pub(crate) fn open_store(&self, db: &Path) -> Result<Store, CliError> {
        let store = Store::open(db, &self.store_config())?;
        log::debug!("Using database {}", store.path().display());
        Ok(store.with_ui(Box::new(TerminalUi)))
    }
}
