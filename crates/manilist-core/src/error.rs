//! Error types for manifest list operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ManifestError`.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors that can occur while reading the local store or rendering output.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// I/O operation on the local store failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A manifest list directory exists but its metadata is unusable.
    #[error("corrupt manifest list at {}: {reason}", path.display())]
    CorruptList {
        /// The manifest list directory.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// A string could not be parsed as an image reference.
    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference {
        /// The offending input.
        reference: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Another manifest list already occupies the directory a reference maps to.
    #[error(
        "manifest list {reference} conflicts with existing list {existing} at {}",
        path.display()
    )]
    Conflict {
        /// The reference being saved.
        reference: String,
        /// The reference already stored in the directory.
        existing: String,
        /// The shared manifest list directory.
        path: PathBuf,
    },

    /// No manifest list exists for the reference.
    #[error("no such manifest list: {reference}")]
    NotFound {
        /// The reference that was looked up.
        reference: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to load config file {}: {reason}", path.display())]
    Config {
        /// The configuration file path.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// The format template could not be parsed or executed.
    #[error("template: {reason}")]
    Template {
        /// Parse or execution failure detail.
        reason: String,
    },

    /// Rendered output could not be written.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn template(reason: impl Into<String>) -> Self {
        Self::Template {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was raised while rendering output.
    ///
    /// Everything else comes from reading the store or the configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use manilist_core::ManifestError;
    ///
    /// let err = ManifestError::Template {
    ///     reason: "unterminated action".to_string(),
    /// };
    /// assert!(err.is_render_error());
    ///
    /// let err = ManifestError::NotFound {
    ///     reference: "example.com/app:1.0".to_string(),
    /// };
    /// assert!(!err.is_render_error());
    /// ```
    #[must_use]
    pub const fn is_render_error(&self) -> bool {
        matches!(self, Self::Template { .. } | Self::Write(_))
    }

    /// Returns `true` if the error was raised while reading the local store.
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::CorruptList { .. }
                | Self::Conflict { .. }
                | Self::InvalidReference { .. }
                | Self::NotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = ManifestError::io(
            "/tmp/manifests",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/tmp/manifests"));
        assert!(display.contains("permission denied"));
        assert!(err.is_store_error());
        assert!(!err.is_render_error());
    }

    #[test]
    fn test_invalid_reference_display() {
        let err = ManifestError::InvalidReference {
            reference: "UPPER/case".into(),
            reason: "repository name must be lowercase",
        };
        assert_eq!(
            err.to_string(),
            "invalid reference 'UPPER/case': repository name must be lowercase"
        );
    }

    #[test]
    fn test_render_errors() {
        let err = ManifestError::template("function \"nope\" not defined");
        assert!(err.is_render_error());
        assert!(err.to_string().starts_with("template: "));

        let err = ManifestError::Write(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe",
        ));
        assert!(err.is_render_error());
        assert!(!err.is_store_error());
    }

    #[test]
    fn test_config_error_is_neither_kind() {
        let err = ManifestError::Config {
            path: PathBuf::from("config.json"),
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(!err.is_render_error());
        assert!(!err.is_store_error());
        assert!(err.to_string().contains("config.json"));
    }
}
