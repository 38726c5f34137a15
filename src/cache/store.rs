//! Cache store abstraction and the local filesystem store
//!
//! The CI cache service is an external collaborator; [`CacheStore`] is
//! its seam. [`FsCacheStore`] is the shipped implementation: each saved
//! key becomes a directory under the store root holding a copy of the
//! cached trees plus a small metadata file. Restores match the exact
//! primary key first, then each fallback as a name prefix (most recent
//! entry wins).

use crate::error::{CsupError, CsupResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key-value artifact cache consumed by the cache manager
#[async_trait]
pub trait CacheStore {
    /// Restore `paths` from the entry matching `primary` exactly, or
    /// any fallback by prefix. Returns the matched key on a hit.
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary: &str,
        fallbacks: &[String],
    ) -> CsupResult<Option<String>>;

    /// Save `paths` under `key`, replacing any existing entry.
    async fn save(&self, paths: &[PathBuf], key: &str) -> CsupResult<()>;
}

/// Metadata stored alongside each cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMeta {
    /// The full key the entry was saved under
    pub key: String,
    /// When the entry was saved
    pub created_at: DateTime<Utc>,
    /// Number of cached trees in the entry
    pub path_count: usize,
    /// Total size of the cached trees in bytes
    pub size_bytes: u64,
}

/// A listed store entry (for inspection commands)
#[derive(Debug, Clone)]
pub struct StoreEntry {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Directory-tree cache store rooted at a local path
pub struct FsCacheStore {
    root: PathBuf,
}

const META_FILE: &str = "meta.json";
const DATA_DIR: &str = "data";

impl FsCacheStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all entries in the store, newest first
    pub fn list(&self) -> CsupResult<Vec<StoreEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&self.root)
            .map_err(|e| CsupError::io(format!("reading store root {}", self.root.display()), e))?;

        for dir_entry in read_dir {
            let dir_entry =
                dir_entry.map_err(|e| CsupError::io("reading store entry", e))?;
            if let Some(meta) = read_meta(&dir_entry.path()) {
                entries.push(StoreEntry {
                    key: meta.key,
                    created_at: meta.created_at,
                    size_bytes: meta.size_bytes,
                });
            }
        }

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Find the entry for `primary` (exact) or a fallback prefix.
    ///
    /// Prefix candidates are resolved to the most recently saved match.
    fn find_entry(&self, primary: &str, fallbacks: &[String]) -> CsupResult<Option<EntryMeta>> {
        let exact = self.root.join(primary);
        if let Some(meta) = read_meta(&exact) {
            return Ok(Some(meta));
        }

        let entries = self.list()?;
        for fallback in fallbacks {
            // list() is newest-first, so the first prefix match wins
            if let Some(entry) = entries.iter().find(|e| e.key.starts_with(fallback.as_str())) {
                let meta = read_meta(&self.root.join(&entry.key));
                if meta.is_some() {
                    return Ok(meta);
                }
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl CacheStore for FsCacheStore {
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary: &str,
        fallbacks: &[String],
    ) -> CsupResult<Option<String>> {
        let Some(meta) = self.find_entry(primary, fallbacks)? else {
            return Ok(None);
        };

        let entry_data = self.root.join(&meta.key).join(DATA_DIR);
        let paths = paths.to_vec();
        let key = meta.key.clone();

        tokio::task::spawn_blocking(move || -> CsupResult<()> {
            for (index, path) in paths.iter().enumerate() {
                let source = entry_data.join(index.to_string());
                if !source.exists() {
                    continue;
                }
                debug!("Restoring {} -> {}", source.display(), path.display());
                copy_tree(&source, path)?;
            }
            Ok(())
        })
        .await
        .map_err(|e| CsupError::CacheStore {
            key: key.clone(),
            reason: e.to_string(),
        })??;

        Ok(Some(key))
    }

    async fn save(&self, paths: &[PathBuf], key: &str) -> CsupResult<()> {
        let entry_dir = self.root.join(key);
        let paths = paths.to_vec();
        let key = key.to_string();
        let key_for_meta = key.clone();

        tokio::task::spawn_blocking(move || -> CsupResult<()> {
            if entry_dir.exists() {
                fs::remove_dir_all(&entry_dir).map_err(|e| {
                    CsupError::io(format!("clearing store entry {}", entry_dir.display()), e)
                })?;
            }

            let data_dir = entry_dir.join(DATA_DIR);
            let mut size_bytes = 0;
            let mut path_count = 0;

            for (index, path) in paths.iter().enumerate() {
                if !path.exists() {
                    debug!("Skipping missing cache path {}", path.display());
                    continue;
                }
                let dest = data_dir.join(index.to_string());
                size_bytes += copy_tree(path, &dest)?;
                path_count += 1;
            }

            let meta = EntryMeta {
                key: key_for_meta,
                created_at: Utc::now(),
                path_count,
                size_bytes,
            };
            let meta_path = entry_dir.join(META_FILE);
            fs::create_dir_all(&entry_dir)
                .map_err(|e| CsupError::io(format!("creating {}", entry_dir.display()), e))?;
            fs::write(&meta_path, serde_json::to_vec_pretty(&meta)?)
                .map_err(|e| CsupError::io(format!("writing {}", meta_path.display()), e))?;
            Ok(())
        })
        .await
        .map_err(|e| CsupError::CacheStore {
            key: key.clone(),
            reason: e.to_string(),
        })??;

        Ok(())
    }
}

fn read_meta(entry_dir: &Path) -> Option<EntryMeta> {
    let content = fs::read_to_string(entry_dir.join(META_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Recursively copy a directory tree, returning the bytes copied.
///
/// Symlinks are skipped; the coursier cache is plain files.
fn copy_tree(source: &Path, dest: &Path) -> CsupResult<u64> {
    fs::create_dir_all(dest)
        .map_err(|e| CsupError::io(format!("creating {}", dest.display()), e))?;

    let mut copied = 0;
    let read_dir = fs::read_dir(source)
        .map_err(|e| CsupError::io(format!("reading {}", source.display()), e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| CsupError::io("reading directory entry", e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| CsupError::io("reading file type", e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if file_type.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else if file_type.is_file() {
            copied += fs::copy(&from, &to)
                .map_err(|e| CsupError::io(format!("copying {}", from.display()), e))?;
        } else {
            debug!("Skipping non-regular file {}", from.display());
        }
    }

    Ok(copied)
}
