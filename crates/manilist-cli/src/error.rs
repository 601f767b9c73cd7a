//! Error conversion utilities for CLI.
//!
//! Converts manilist-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow). The original message always comes first;
//! hints follow on their own line.

use anyhow::anyhow;
use manilist_core::ManifestError;
use manilist_core::format::TABLE_FORMAT_KEY;

const FIELDS_HINT: &str = "Available fields: .Name .Repository .Tag .Digest";

/// Converts an error from reading the manifest store.
pub fn convert_store_error(err: ManifestError) -> anyhow::Error {
    match err {
        ManifestError::CorruptList { ref path, .. } => {
            let path = path.display().to_string();
            anyhow!(
                "{err}\n\
                 HINT: Remove the directory '{path}' to discard the broken manifest list."
            )
        }
        _ => anyhow::Error::from(err),
    }
}

/// Converts an error from rendering `format`.
pub fn convert_render_error(err: ManifestError, format: &str) -> anyhow::Error {
    match err {
        ManifestError::Template { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Check the format '{format}' (from --format or manifestListsFormat in \
                 config.json). {FIELDS_HINT}; keys: {TABLE_FORMAT_KEY}, raw, json."
            )
        }
        _ => anyhow::Error::from(err),
    }
}

/// Converts an error from loading the configuration file.
pub fn convert_config_error(err: ManifestError) -> anyhow::Error {
    match err {
        ManifestError::Config { .. } => anyhow!(
            "{err}\n\
             HINT: Fix the JSON syntax, or point --config / MANILIST_CONFIG at another directory."
        ),
        _ => anyhow::Error::from(err),
    }
}
