//! Persistent download cache across CI runs
//!
//! Wraps a key-value artifact store around the coursier cache
//! directory. Keys are `coursier-cache-<hash>-<timestamp>` with two
//! prefix fallbacks, `coursier-cache-<hash>` and the bare
//! `coursier-cache-`. The timestamp segment makes the primary key
//! unique per run, so restores in practice land on the fallbacks.
//!
//! Cache operations never fail the surrounding workflow: restore and
//! save report a [`CacheOutcome`] and swallow store errors after
//! logging them.

pub mod hashing;
pub mod store;

pub use hashing::hash_files;
pub use store::{CacheStore, FsCacheStore, StoreEntry};

use chrono::Utc;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Format bytes as human-readable size (e.g., "1.5 GB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Key prefix shared by all cache entries
pub const KEY_PREFIX: &str = "coursier-cache-";

/// Cache key for one save/restore pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Exact key: `coursier-cache-<hash>-<millis>`
    pub primary: String,
    /// Prefix fallbacks tried in order on a primary miss
    pub restore_keys: Vec<String>,
}

impl CacheKey {
    /// Build the key set for a caller-supplied hash.
    ///
    /// The primary key embeds the current wall-clock millis, so two
    /// runs never share a primary key; cross-run restores ride the
    /// `<prefix><hash>` and bare-prefix fallbacks.
    pub fn for_hash(hash: &str) -> Self {
        Self::at(hash, Utc::now().timestamp_millis())
    }

    /// Build the key set with an explicit timestamp
    pub fn at(hash: &str, millis: i64) -> Self {
        Self {
            primary: format!("{KEY_PREFIX}{hash}-{millis}"),
            restore_keys: vec![format!("{KEY_PREFIX}{hash}"), KEY_PREFIX.to_string()],
        }
    }
}

/// Outcome of a cache operation; never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Restore hit, with the key that matched
    Restored { key: String },
    /// Restore found nothing
    Miss,
    /// Save completed under the given key
    Saved { key: String },
    /// The store failed; the run continues regardless
    Unavailable { reason: String },
}

impl CacheOutcome {
    /// Whether a restore actually seeded the cache directory
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

impl fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restored { key } => write!(f, "restored from {key}"),
            Self::Miss => write!(f, "miss"),
            Self::Saved { key } => write!(f, "saved as {key}"),
            Self::Unavailable { reason } => write!(f, "unavailable: {reason}"),
        }
    }
}

/// Cache manager tying a store to the coursier cache directory
pub struct CacheManager {
    store: Box<dyn CacheStore + Send + Sync>,
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Create a manager over the given store and cache directory
    pub fn new(store: Box<dyn CacheStore + Send + Sync>, cache_dir: PathBuf) -> Self {
        Self { store, cache_dir }
    }

    /// The directory save and restore operate on
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Restore the cache directory for the given hash.
    ///
    /// Store failures are logged and reported as `Unavailable`; the
    /// caller continues either way.
    pub async fn restore(&self, hash: &str) -> CacheOutcome {
        let key = CacheKey::for_hash(hash);
        let paths = [self.cache_dir.clone()];

        match self
            .store
            .restore(&paths, &key.primary, &key.restore_keys)
            .await
        {
            Ok(Some(matched)) => {
                info!("Cache restored from key {}", matched);
                CacheOutcome::Restored { key: matched }
            }
            Ok(None) => {
                info!("Cache miss for {}", key.primary);
                CacheOutcome::Miss
            }
            Err(e) => {
                debug!("Cache restore error: {}", e);
                warn!("Cache restore unavailable, continuing without it");
                CacheOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Save the cache directory under a fresh primary key.
    pub async fn save(&self, hash: &str) -> CacheOutcome {
        let key = CacheKey::for_hash(hash);
        let paths = [self.cache_dir.clone()];

        match self.store.save(&paths, &key.primary).await {
            Ok(()) => {
                info!("Cache saved as {}", key.primary);
                CacheOutcome::Saved { key: key.primary }
            }
            Err(e) => {
                debug!("Cache save error: {}", e);
                warn!("Cache save unavailable, continuing without it");
                CacheOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsupError, CsupResult};
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl CacheStore for FailingStore {
        async fn restore(
            &self,
            _paths: &[PathBuf],
            primary: &str,
            _fallbacks: &[String],
        ) -> CsupResult<Option<String>> {
            Err(CsupError::CacheStore {
                key: primary.to_string(),
                reason: "store offline".to_string(),
            })
        }

        async fn save(&self, _paths: &[PathBuf], key: &str) -> CsupResult<()> {
            Err(CsupError::CacheStore {
                key: key.to_string(),
                reason: "store offline".to_string(),
            })
        }
    }

    #[test]
    fn key_pattern_for_hash() {
        let key = CacheKey::for_hash("abc");
        let rest = key.primary.strip_prefix("coursier-cache-abc-").unwrap();
        assert!(!rest.is_empty());
        assert!(rest.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            key.restore_keys,
            vec!["coursier-cache-abc".to_string(), "coursier-cache-".to_string()]
        );
    }

    #[test]
    fn key_at_fixed_timestamp() {
        let key = CacheKey::at("abc", 1700000000000);
        assert_eq!(key.primary, "coursier-cache-abc-1700000000000");
    }

    #[test]
    fn primary_keys_differ_across_calls() {
        // The timestamp segment makes exact cross-run matches
        // effectively impossible; both fallbacks stay identical.
        let a = CacheKey::at("abc", 1);
        let b = CacheKey::at("abc", 2);
        assert_ne!(a.primary, b.primary);
        assert_eq!(a.restore_keys, b.restore_keys);
    }

    #[tokio::test]
    async fn restore_never_errors_on_store_failure() {
        let manager = CacheManager::new(Box::new(FailingStore), PathBuf::from("/tmp/x"));
        let outcome = manager.restore("abc").await;
        assert!(matches!(outcome, CacheOutcome::Unavailable { .. }));
    }

    #[tokio::test]
    async fn save_never_errors_on_store_failure() {
        let manager = CacheManager::new(Box::new(FailingStore), PathBuf::from("/tmp/x"));
        let outcome = manager.save("abc").await;
        assert!(matches!(outcome, CacheOutcome::Unavailable { .. }));
    }

    #[tokio::test]
    async fn roundtrip_through_fs_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let cache_dir = temp.path().join("coursier-v1");
        std::fs::create_dir_all(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("artifact.jar"), b"jar bytes").unwrap();

        let store = FsCacheStore::new(temp.path().join("store"));
        let manager = CacheManager::new(Box::new(store), cache_dir.clone());

        let saved = manager.save("abc").await;
        assert!(matches!(saved, CacheOutcome::Saved { .. }));

        std::fs::remove_dir_all(&cache_dir).unwrap();

        // Fresh timestamped primary key misses; the hash fallback hits.
        let restored = manager.restore("abc").await;
        assert!(restored.is_hit());
        assert!(cache_dir.join("artifact.jar").exists());
    }

    #[test]
    fn format_bytes_ranges() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn outcome_display() {
        assert_eq!(CacheOutcome::Miss.to_string(), "miss");
        assert!(CacheOutcome::Restored {
            key: "coursier-cache-abc".to_string()
        }
        .to_string()
        .contains("coursier-cache-abc"));
    }
}
