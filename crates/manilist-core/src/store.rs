//! Local manifest list store.
//!
//! On disk every manifest list is a directory under the store root, named
//! after the file-safe form of its reference:
//!
//! ```text
//! manifests/
//! ├── example.com_team_app-v1/
//! │   ├── list.json                      {"reference": "example.com/team/app:v1"}
//! │   └── example.com_team_app-v1-amd64  (per-image manifests, not read here)
//! └── busybox-latest/
//!     └── list.json
//! ```
//!
//! The directory name is lossy (`a:b` and `a-b` map to the same name), so the
//! reference is read back from `list.json` and checked before a directory is
//! overwritten or removed.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::ManifestError;
use crate::Reference;
use crate::Result;

/// Name of the metadata file inside each manifest list directory.
pub const LIST_METADATA_FILE: &str = "list.json";

/// Access to the locally known manifest lists.
pub trait ManifestStore {
    /// Returns every manifest list reference in the store, in no particular
    /// order.
    fn list(&self) -> Result<Vec<Reference>>;

    /// Deletes a manifest list and all of its image manifests.
    fn remove(&self, reference: &Reference) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ListMetadata {
    reference: String,
}

/// Filesystem-backed [`ManifestStore`].
///
/// # Examples
///
/// ```no_run
/// use manilist_core::FsStore;
/// use manilist_core::ManifestStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FsStore::new("/home/user/.manilist/manifests");
/// for reference in store.list()? {
///     println!("{reference}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`. The directory does not need to
    /// exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn list_dir(&self, reference: &Reference) -> PathBuf {
        self.root.join(file_safe_name(&reference.to_string()))
    }

    /// Registers a manifest list, creating its directory and metadata.
    ///
    /// Only the list itself is recorded; the CLI never creates lists, so this
    /// is how tools and test fixtures populate a store.
    ///
    /// Saving an already known list is a no-op apart from rewriting the
    /// metadata file. Unusable metadata is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Conflict`] if the directory already holds a
    /// different list whose reference has the same file-safe name.
    pub fn save(&self, reference: &Reference) -> Result<PathBuf> {
        let dir = self.list_dir(reference);
        match Self::read_list(&dir) {
            Ok(existing) if existing != *reference => {
                return Err(ManifestError::Conflict {
                    reference: reference.to_string(),
                    existing: existing.to_string(),
                    path: dir,
                });
            }
            Ok(_) | Err(ManifestError::CorruptList { .. }) => {}
            Err(e) => return Err(e),
        }

        fs::create_dir_all(&dir).map_err(|e| ManifestError::io(&dir, e))?;

        let metadata = ListMetadata {
            reference: reference.to_string(),
        };
        let json = serde_json::to_string_pretty(&metadata).map_err(|e| {
            ManifestError::CorruptList {
                path: dir.clone(),
                reason: e.to_string(),
            }
        })?;

        let file = dir.join(LIST_METADATA_FILE);
        fs::write(&file, json).map_err(|e| ManifestError::io(&file, e))?;
        debug!(reference = %reference, path = %dir.display(), "saved manifest list");
        Ok(dir)
    }

    fn read_list(dir: &Path) -> Result<Reference> {
        let file = dir.join(LIST_METADATA_FILE);
        let contents = match fs::read_to_string(&file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::CorruptList {
                    path: dir.to_path_buf(),
                    reason: format!("missing {LIST_METADATA_FILE}"),
                });
            }
            Err(e) => return Err(ManifestError::io(&file, e)),
        };

        let metadata: ListMetadata =
            serde_json::from_str(&contents).map_err(|e| ManifestError::CorruptList {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;

        Reference::parse(&metadata.reference).map_err(|e| ManifestError::CorruptList {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ManifestStore for FsStore {
    fn list(&self) -> Result<Vec<Reference>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "manifest store does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ManifestError::io(&self.root, e)),
        };

        let mut references = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ManifestError::io(&self.root, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ManifestError::io(&path, e))?;
            if !file_type.is_dir() {
                trace!(path = %path.display(), "skipping non-directory entry");
                continue;
            }
            references.push(Self::read_list(&path)?);
        }

        debug!(
            root = %self.root.display(),
            count = references.len(),
            "listed manifest lists"
        );
        Ok(references)
    }

    fn remove(&self, reference: &Reference) -> Result<()> {
        let not_found = || ManifestError::NotFound {
            reference: reference.to_string(),
        };

        let dir = self.list_dir(reference);
        if !dir.is_dir() {
            return Err(not_found());
        }
        let stored = Self::read_list(&dir)?;
        if stored != *reference {
            debug!(
                reference = %reference,
                stored = %stored,
                "directory belongs to another manifest list"
            );
            return Err(not_found());
        }

        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                debug!(reference = %reference, "removed manifest list");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(ManifestError::io(&dir, e)),
        }
    }
}

/// Maps a reference string to a name usable as a single path component.
pub fn file_safe_name(reference: &str) -> String {
    reference
        .chars()
        .map(|c| match c {
            '/' => '_',
            ':' => '-',
            '@' => '+',
            other => other,
        })
        .collect()
}
