//! Local manifest list management.
//!
//! `manilist-core` keeps track of manifest lists (multi-platform image
//! manifests) cached on the local machine and renders them for humans and
//! scripts. It provides:
//!
//! - [`Reference`]: parsing and display of image references
//! - [`natural_cmp`]: alphanumeric-aware ordering (`img2` before `img10`)
//! - [`ManifestStore`] and [`FsStore`]: access to the local list cache
//! - [`ConfigFile`]: client configuration with a default list format
//! - [`write_manifest_lists`]: table, raw, JSON and template rendering
//!
//! # Examples
//!
//! ```no_run
//! use manilist_core::Context;
//! use manilist_core::Format;
//! use manilist_core::FsStore;
//! use manilist_core::ManifestStore;
//! use manilist_core::natural_cmp;
//! use manilist_core::write_manifest_lists;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FsStore::new("/home/user/.manilist/manifests");
//! let mut lists = store.list()?;
//! lists.sort_by(|a, b| natural_cmp(&a.to_string(), &b.to_string()));
//!
//! let mut out = std::io::stdout();
//! let ctx = Context::new(&mut out, Format::new("table", false));
//! write_manifest_lists(ctx, &lists)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod format;
pub mod natural;
pub mod reference;
pub mod store;

pub use config::ConfigFile;
pub use error::ManifestError;
pub use error::Result;
pub use format::Context;
pub use format::Format;
pub use format::ManifestListRow;
pub use format::write_manifest_lists;
pub use natural::natural_cmp;
pub use natural::natural_less;
pub use reference::Reference;
pub use store::FsStore;
pub use store::ManifestStore;
