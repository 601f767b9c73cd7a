//! Remove command implementation

use crate::cli::RmArgs;
use anyhow::Result;
use anyhow::bail;
use manilist_core::ManifestStore;
use manilist_core::Reference;
use tracing::debug;
use tracing::warn;

/// Removes every listed manifest list, reporting all failures at the end.
#[tracing::instrument(skip_all, fields(count = args.manifest_lists.len()))]
pub fn execute(args: &RmArgs, store: &dyn ManifestStore) -> Result<()> {
    let mut failures = Vec::new();

    for name in &args.manifest_lists {
        match Reference::parse(name).and_then(|reference| store.remove(&reference)) {
            Ok(()) => debug!(manifest_list = %name, "removed"),
            Err(err) => {
                warn!(manifest_list = %name, error = %err, "removal failed");
                failures.push(err.to_string());
            }
        }
    }

    if !failures.is_empty() {
        bail!(failures.join("\n"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use manilist_core::FsStore;
    use tempfile::TempDir;

    fn args(names: &[&str]) -> RmArgs {
        RmArgs {
            manifest_lists: names.iter().map(ToString::to_string).collect(),
        }
    }

    fn store_with(temp: &TempDir, names: &[&str]) -> FsStore {
        let store = FsStore::new(temp.path());
        for name in names {
            store.save(&Reference::parse(name).unwrap()).unwrap();
        }
        store
    }

    fn listed(store: &FsStore) -> Vec<String> {
        let mut names: Vec<String> = store.list().unwrap().iter().map(ToString::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_remove_several() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &["app:1", "app:2", "app:3"]);

        execute(&args(&["app:1", "app:3"]), &store).unwrap();

        assert_eq!(listed(&store), ["app:2"]);
    }

    #[test]
    fn test_failures_do_not_stop_other_removals() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &["app:1", "app:2"]);

        let err = execute(&args(&["app:404", "Bad:Ref", "app:2"]), &store).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("no such manifest list: app:404"));
        assert!(msg.contains("invalid reference 'Bad:Ref'"));
        assert_eq!(listed(&store), ["app:1"]);
    }
}
