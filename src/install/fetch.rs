//! Launcher download and decompression
//!
//! The `cs` launcher ships as a single gzipped binary; download and
//! gunzip happen in one streaming pass on a blocking task.

use crate::error::{CsupError, CsupResult};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Download a gzipped binary and write the decompressed bytes to `dest`.
pub async fn download_gz(url: &str, dest: &Path) -> CsupResult<PathBuf> {
    let url = url.to_string();
    let url_for_errors = url.clone();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> CsupResult<PathBuf> {
        debug!("Downloading {} -> {}", url, dest.display());

        let mut response = ureq::get(&url).call().map_err(|e| CsupError::Download {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let reader = response.body_mut().as_reader();
        let mut decoder = flate2::read::GzDecoder::new(reader);
        let mut out = File::create(&dest)
            .map_err(|e| CsupError::io(format!("creating {}", dest.display()), e))?;

        let bytes = io::copy(&mut decoder, &mut out).map_err(|e| CsupError::Download {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        debug!("Wrote {} bytes to {}", bytes, dest.display());
        Ok(dest)
    })
    .await
    .map_err(|e| CsupError::Download {
        url: url_for_errors,
        reason: e.to_string(),
    })?
}

/// Set executable permission on a file (Unix only).
#[allow(unused_variables)]
pub fn make_executable(path: &Path) -> CsupResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path)
            .map_err(|e| CsupError::io(format!("reading metadata for {}", path.display()), e))?;

        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(path, permissions).map_err(|e| {
            CsupError::io(format!("marking {} executable", path.display()), e)
        })?;

        debug!("Set executable permission on {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn make_executable_sets_exec_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cs");
        fs::write(&path, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        make_executable(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn make_executable_missing_file_errors() {
        let err = make_executable(Path::new("/nonexistent/cs")).unwrap_err();
        assert!(matches!(err, CsupError::Io { .. }));
    }

    #[tokio::test]
    async fn download_bad_url_is_download_error() {
        let temp = TempDir::new().unwrap();
        let err = download_gz("http://127.0.0.1:1/cs.gz", &temp.path().join("cs"))
            .await
            .unwrap_err();
        assert!(matches!(err, CsupError::Download { .. }));
    }
}
