//! Path and URL conventions for uploaded assets.
//!
//! Files live under `public/assets/<category>/` named by upload timestamp
//! plus the original extension. Records store the absolute URL
//! `<base_url>/public/assets/<category>/<file>`; deletion strips the
//! scheme+host prefix back to the relative on-disk path.

/// Extensions treated as images, for covers, avatars, and proof photos.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Relative on-disk path for an uploaded file:
/// `public/assets/<category>/<timestamp_millis><ext>`.
///
/// `ext` must include the leading dot (may be empty).
pub fn asset_rel_path(category: &str, timestamp_millis: i64, ext: &str) -> String {
    format!("public/assets/{category}/{timestamp_millis}{ext}")
}

/// Absolute URL stored in records for an uploaded file.
pub fn asset_url(base_url: &str, rel_path: &str) -> String {
    format!("{}/{rel_path}", base_url.trim_end_matches('/'))
}

/// Recover the relative on-disk path from a stored asset URL.
///
/// Strips `scheme://host[:port]/` and returns the remainder, or `None` when
/// the URL has no path component.
pub fn url_to_rel_path(url: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    rest.split_once('/').map(|(_, path)| path.to_string())
}

/// Lower-cased extension of a filename, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether a filename carries an image extension.
pub fn is_image_file(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
