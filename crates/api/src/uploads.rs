//! Multipart upload storage under the public asset root.
//!
//! Files land under `public/assets/<category>/<timestamp><ext>` and are
//! served back through the `/public` static route. [`StoredUpload`] is a
//! guard: until [`StoredUpload::persist`] is called, dropping it removes the
//! file from disk, so a handler that fails after storing an upload leaves no
//! orphan behind.

use std::path::{Path, PathBuf};

use pustaka_core::assets::{asset_rel_path, asset_url, file_extension, url_to_rel_path};

use crate::error::AppError;

/// An uploaded file written to disk, pending handler success.
#[derive(Debug)]
pub struct StoredUpload {
    abs_path: PathBuf,
    url: String,
    persisted: bool,
}

impl StoredUpload {
    /// Public URL the stored file is served at.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mark the file as kept and return its public URL. After this the guard
    /// no longer deletes the file on drop.
    pub fn persist(mut self) -> String {
        self.persisted = true;
        self.url.clone()
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.abs_path);
        }
    }
}

/// Write one multipart field's bytes to the asset tree.
///
/// The destination name is the current millisecond timestamp plus the
/// original extension, which keeps names unique per category in practice.
/// The caller validates the extension before calling; this only places the
/// bytes.
pub async fn store_field(
    assets_root: &Path,
    base_url: &str,
    category: &str,
    original_filename: &str,
    data: &[u8],
) -> Result<StoredUpload, AppError> {
    let ext = file_extension(original_filename).ok_or_else(|| {
        AppError::BadRequest("File harus memiliki ekstensi yang valid".to_string())
    })?;

    let stamp = chrono::Utc::now().timestamp_millis();
    let rel = asset_rel_path(category, stamp, &format!(".{ext}"));
    let abs_path = assets_root.join(&rel);

    if let Some(parent) = abs_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create asset dir: {e}")))?;
    }
    tokio::fs::write(&abs_path, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    Ok(StoredUpload {
        abs_path,
        url: asset_url(base_url, &rel),
        persisted: false,
    })
}

/// Best-effort removal of a previously stored asset given its public URL.
///
/// Used when an entity is deleted or its file replaced. URLs that do not
/// point into the asset tree are ignored.
pub fn delete_asset(assets_root: &Path, url: &str) {
    if let Some(rel) = url_to_rel_path(url) {
        let _ = std::fs::remove_file(assets_root.join(rel));
    }
}
