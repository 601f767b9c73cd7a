//! Per-invocation state shared by commands: configuration and the store.

use anyhow::Context as _;
use anyhow::Result;
use manilist_core::ConfigFile;
use manilist_core::FsStore;
use manilist_core::config::MANIFESTS_DIR_NAME;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

use crate::error::convert_config_error;

/// Config directory used when neither `--config` nor `MANILIST_CONFIG` is set.
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".manilist";

pub struct CliContext {
    pub config: ConfigFile,
    pub store: FsStore,
}

impl CliContext {
    /// Loads the configuration and opens the store under `config_dir`, or the
    /// default directory in the user's home.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_config_dir()?,
        };
        debug!(dir = %dir.display(), "using config directory");

        let config = ConfigFile::load(&dir).map_err(convert_config_error)?;
        let store = FsStore::new(dir.join(MANIFESTS_DIR_NAME));
        Ok(Self { config, store })
    }
}

fn default_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .context("Could not determine home directory\nHINT: Use --config to choose a config directory.")?;
    Ok(home.join(DEFAULT_CONFIG_DIR_NAME))
}
