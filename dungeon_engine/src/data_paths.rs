//! Locating the bundled map and config files.
//!
//! `DUNGEON_DATA_DIR` wins when set. Otherwise the first existing directory
//! among `dungeon_engine/data`, `data` and the same names next to the
//! executable is used.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;

/// Environment variable that pins the data directory.
pub const DATA_DIR_VAR: &str = "DUNGEON_DATA_DIR";

static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(|| {
    let root = env::var_os(DATA_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| first_existing(&candidate_roots()));
    debug!("data directory resolved to '{}'", root.display());
    root
});

/// Path of `relative` inside the data directory.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("dungeon_engine/data"), PathBuf::from("data")];
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(dir) = exe_dir {
        roots.push(dir.join("data"));
        if let Some(up) = dir.parent() {
            roots.push(up.join("dungeon_engine/data"));
        }
    }
    roots
}

fn first_existing(roots: &[PathBuf]) -> PathBuf {
    roots
        .iter()
        .find(|root| root.is_dir())
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_existing_skips_missing_dirs() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("data");
        std::fs::create_dir(&present).unwrap();
        let roots = vec![dir.path().join("absent"), present.clone()];
        assert_eq!(first_existing(&roots), present);
    }

    #[test]
    fn falls_back_to_plain_data_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(first_existing(&[dir.path().join("nope")]), PathBuf::from("data"));
    }
}
