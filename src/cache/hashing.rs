//! File hashing for cache key inputs
//!
//! The cache key hash is caller-supplied; this helper derives one from
//! a set of dependency-definition files (build.sbt, project/*.sbt,
//! whatever the workflow names). Same files = same hash = same cache.

use crate::error::{CsupError, CsupResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Hash the contents of the given files using SHA256.
///
/// Files are fed to the hasher in the order given, so callers should
/// pass a stable ordering. Returns the first 16 hex characters.
pub fn hash_files<P: AsRef<Path>>(paths: &[P]) -> CsupResult<String> {
    let mut hasher = Sha256::new();

    for path in paths {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| CsupError::Io {
            context: format!("reading hash input {}", path.display()),
            source: e,
        })?;
        hasher.update(&contents);
    }

    let result = hasher.finalize();
    let hash = hex::encode(&result[..8]);
    debug!("Hashed {} file(s) -> {}", paths.len(), hash);
    Ok(hash)
}
