//! List command implementation

use crate::cli::ListArgs;
use crate::error::convert_render_error;
use crate::error::convert_store_error;
use anyhow::Result;
use manilist_core::ConfigFile;
use manilist_core::Context;
use manilist_core::Format;
use manilist_core::ManifestStore;
use manilist_core::format::TABLE_FORMAT_KEY;
use manilist_core::natural_cmp;
use manilist_core::write_manifest_lists;
use std::io::Write;
use tracing::debug;

/// Options of a single `manifest ls` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub quiet: bool,
    pub format: String,
}

impl From<&ListArgs> for ListOptions {
    fn from(args: &ListArgs) -> Self {
        Self {
            quiet: args.quiet,
            format: args.format.clone(),
        }
    }
}

/// Picks the format to render with.
///
/// An explicit `--format` always wins. Otherwise the configured default is
/// used, except in quiet mode, which must print names only.
pub fn resolve_format<'a>(options: &'a ListOptions, config: &'a ConfigFile) -> &'a str {
    if !options.format.is_empty() {
        return &options.format;
    }
    match config.manifest_lists_format() {
        Some(format) if !options.quiet => format,
        _ => TABLE_FORMAT_KEY,
    }
}

#[tracing::instrument(skip_all, fields(quiet = options.quiet))]
pub fn execute(
    options: &ListOptions,
    store: &dyn ManifestStore,
    config: &ConfigFile,
    out: &mut dyn Write,
) -> Result<()> {
    let manifest_lists = store.list().map_err(convert_store_error)?;

    let format = resolve_format(options, config);
    debug!(format, count = manifest_lists.len(), "resolved list format");

    let mut keyed: Vec<_> = manifest_lists
        .into_iter()
        .map(|reference| (reference.to_string(), reference))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
    let manifest_lists: Vec<_> = keyed.into_iter().map(|(_, reference)| reference).collect();

    let ctx = Context::new(out, Format::new(format, options.quiet));
    write_manifest_lists(ctx, &manifest_lists).map_err(|e| convert_render_error(e, format))
}
