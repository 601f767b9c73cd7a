//! Client configuration file (`config.json`).

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::ManifestError;
use crate::Result;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory inside the config directory that holds the manifest store.
pub const MANIFESTS_DIR_NAME: &str = "manifests";

/// Client configuration.
///
/// Only the settings this tool understands are modeled; other keys in the
/// file are ignored.
///
/// # Examples
///
/// ```
/// use manilist_core::ConfigFile;
///
/// let config: ConfigFile =
///     serde_json::from_str(r#"{"manifestListsFormat": "{{.Name}}"}"#).unwrap();
/// assert_eq!(config.manifest_lists_format(), Some("{{.Name}}"));
///
/// assert_eq!(ConfigFile::default().manifest_lists_format(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Default format for `manifest ls` output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_lists_format: Option<String>,
}

impl ConfigFile {
    /// Loads `config.json` from `dir`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Config`] if the file exists but cannot be
    /// read or is not valid JSON.
    pub fn load(dir: &Path) -> Result<Self> {
        let filename = dir.join(CONFIG_FILE_NAME);
        let config_error = |reason: String| ManifestError::Config {
            path: filename.clone(),
            reason,
        };

        let contents = match fs::read_to_string(&filename) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %filename.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(config_error(e.to_string())),
        };

        let config: Self =
            serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        debug!(path = %filename.display(), "loaded config file");
        Ok(config)
    }

    /// The configured default list format, if set and non-empty.
    pub fn manifest_lists_format(&self) -> Option<&str> {
        self.manifest_lists_format
            .as_deref()
            .filter(|format| !format.is_empty())
    }
}
