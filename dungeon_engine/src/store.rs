//! Working-copy storage for the map document.
//!
//! The original map file is never written to. Loading copies it to a working
//! location, every state change rewrites that copy in full, and quitting
//! removes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dungeon_data::{MapDef, validate_map};
use log::{debug, info, warn};
use thiserror::Error;

/// Default file name of the working copy, relative to the working directory.
pub const WORKING_COPY: &str = "map_copy.json";

/// Failures of the world store. All of them end the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("map file '{}' not found", path.display())]
    MapNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("map file '{}' is corrupt: {reason}", path.display())]
    MapCorrupt { path: PathBuf, reason: String },
    #[error("working copy and source map are the same file '{}'", path.display())]
    SameFile { path: PathBuf },
    #[error("i/o error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize map document")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write working copy '{}'", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Owns the locations of the source map and of its mutable working copy.
#[derive(Debug, Clone)]
pub struct WorldStore {
    source: PathBuf,
    working_copy: PathBuf,
}

impl WorldStore {
    pub fn new(source: impl Into<PathBuf>, working_copy: impl Into<PathBuf>) -> WorldStore {
        WorldStore {
            source: source.into(),
            working_copy: working_copy.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn working_copy(&self) -> &Path {
        &self.working_copy
    }

    /// Copy the source map to the working location, then parse and validate the copy.
    ///
    /// # Errors
    /// - `MapNotFound` if the source map doesn't exist
    /// - `SameFile` if the working copy location is the source map itself
    /// - `MapCorrupt` if it isn't valid JSON or fails validation
    /// - `Io` if the working copy cannot be created or read
    pub fn load(&self) -> Result<MapDef, StoreError> {
        self.ensure_distinct()?;
        fs::copy(&self.source, &self.working_copy).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound && !self.source.exists() {
                StoreError::MapNotFound {
                    path: self.source.clone(),
                    source,
                }
            } else {
                StoreError::Io {
                    path: self.working_copy.clone(),
                    source,
                }
            }
        })?;
        debug!(
            "copied map '{}' to working copy '{}'",
            self.source.display(),
            self.working_copy.display()
        );

        let text = fs::read_to_string(&self.working_copy).map_err(|source| StoreError::Io {
            path: self.working_copy.clone(),
            source,
        })?;
        let map: MapDef = serde_json::from_str(&text).map_err(|err| StoreError::MapCorrupt {
            path: self.source.clone(),
            reason: err.to_string(),
        })?;

        let errors = validate_map(&map);
        if !errors.is_empty() {
            let details = errors
                .into_iter()
                .map(|err| format!("- {err}"))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(StoreError::MapCorrupt {
                path: self.source.clone(),
                reason: format!("validation failed:\n{details}"),
            });
        }

        info!(
            "map '{}' loaded: {} rooms, {} npcs, {} starting items",
            self.source.display(),
            map.rooms.len(),
            map.npcs.len(),
            map.inventory.len()
        );
        Ok(map)
    }

    /// Overwrite the working copy with the full document.
    ///
    /// The document is written to a sibling temp file first and renamed over
    /// the working copy, so a crash never leaves a half-written file behind.
    ///
    /// # Errors
    /// - `Serialize` or `Persist` if the document cannot be written
    pub fn persist(&self, doc: &MapDef) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;
        let staging = self.staging_path();
        let write = fs::write(&staging, json).and_then(|()| fs::rename(&staging, &self.working_copy));
        write.map_err(|source| StoreError::Persist {
            path: self.working_copy.clone(),
            source,
        })?;
        debug!("working copy '{}' updated", self.working_copy.display());
        Ok(())
    }

    /// Remove the working copy. A copy that is already gone is not an error.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be removed
    pub fn discard(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.working_copy) {
            Ok(()) => {
                info!("working copy '{}' removed", self.working_copy.display());
                Ok(())
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("working copy '{}' was already gone", self.working_copy.display());
                Ok(())
            },
            Err(source) => Err(StoreError::Io {
                path: self.working_copy.clone(),
                source,
            }),
        }
    }

    /// Copying a file onto itself truncates it, so the two paths must resolve apart.
    fn ensure_distinct(&self) -> Result<(), StoreError> {
        let source = fs::canonicalize(&self.source).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::MapNotFound {
                    path: self.source.clone(),
                    source,
                }
            } else {
                StoreError::Io {
                    path: self.source.clone(),
                    source,
                }
            }
        })?;
        if let Ok(copy) = fs::canonicalize(&self.working_copy)
            && copy == source
        {
            warn!("refusing to use '{}' as its own working copy", source.display());
            return Err(StoreError::SameFile { path: source });
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .working_copy
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| WORKING_COPY.into());
        name.push(".tmp");
        self.working_copy.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const MAP: &str = r#"{
        "opening": "Hello",
        "genericMsgs": {"missingCmd": "a", "invalidCmd": "b", "deadend": "c",
                        "noItemHere": "d", "emptyInventory": "e", "helpCmd": "f"},
        "rooms": {"start": {"description": "Start", "items": ["coin"]}},
        "npcs": {},
        "inventory": []
    }"#;

    fn store_in(dir: &Path) -> WorldStore {
        WorldStore::new(dir.join("orig_map.json"), dir.join(WORKING_COPY))
    }

    #[test]
    fn load_creates_working_copy_and_leaves_source_alone() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        fs::write(store.source(), MAP)?;

        let map = store.load()?;
        assert_eq!(map.opening, "Hello");
        assert!(store.working_copy().exists());
        assert_eq!(fs::read_to_string(store.source())?, MAP);
        Ok(())
    }

    #[test]
    fn missing_source_is_map_not_found() -> Result<()> {
        let dir = tempdir()?;
        let err = store_in(dir.path()).load().unwrap_err();
        assert!(matches!(err, StoreError::MapNotFound { .. }));
        Ok(())
    }

    #[test]
    fn bad_json_is_map_corrupt() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        fs::write(store.source(), "{ not json")?;
        assert!(matches!(store.load().unwrap_err(), StoreError::MapCorrupt { .. }));
        Ok(())
    }

    #[test]
    fn dangling_exit_is_map_corrupt() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        fs::write(store.source(), MAP.replace(r#""items": ["coin"]"#, r#""items": [], "north": "void""#))?;
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("missing room 'void'"));
        Ok(())
    }

    #[test]
    fn working_copy_on_top_of_source_is_refused() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join(WORKING_COPY);
        fs::write(&source, MAP)?;

        let same = WorldStore::new(&source, &source);
        assert!(matches!(same.load().unwrap_err(), StoreError::SameFile { .. }));

        let dotted = WorldStore::new(&source, dir.path().join(".").join(WORKING_COPY));
        assert!(matches!(dotted.load().unwrap_err(), StoreError::SameFile { .. }));
        assert_eq!(fs::read_to_string(&source)?, MAP);
        Ok(())
    }

    #[test]
    fn persist_rewrites_working_copy_only() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        fs::write(store.source(), MAP)?;
        let mut map = store.load()?;
        map.inventory.push("coin".into());
        store.persist(&map)?;

        let written: MapDef = serde_json::from_str(&fs::read_to_string(store.working_copy())?)?;
        assert_eq!(written.inventory, vec!["coin".to_string()]);
        assert_eq!(fs::read_to_string(store.source())?, MAP);
        assert!(!dir.path().join("map_copy.json.tmp").exists());
        Ok(())
    }

    #[test]
    fn discard_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        fs::write(store.source(), MAP)?;
        store.load()?;
        store.discard()?;
        assert!(!store.working_copy().exists());
        store.discard()?;
        Ok(())
    }
}
