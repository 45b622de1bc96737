//! Listing image uploads.
//!
//! Uploaded images are written under the configured uploads directory
//! with randomised names and served back as static files. Only a small
//! whitelist of image extensions is accepted.

use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

/// Accepted image file extensions, lowercased.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload had no usable filename.
    #[error("upload has no filename")]
    MissingFilename,

    /// The file extension isn't an accepted image type.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// The upload exceeds the size cap.
    #[error("image too large ({0} bytes)")]
    TooLarge(usize),

    /// Filesystem error while writing the image.
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Store an uploaded image and return its public URL path.
///
/// The image is written to `uploads_dir` under a fresh random name that
/// keeps the original extension. The returned path is what handlers put
/// in the `image_path` column, e.g. `/uploads/3f2a....png`.
///
/// # Errors
///
/// Returns `UploadError` if the filename or extension is unacceptable,
/// the data exceeds [`MAX_IMAGE_BYTES`], or the write fails.
pub async fn save_image(
    uploads_dir: &Path,
    original_filename: &str,
    data: &[u8],
) -> Result<String, UploadError> {
    let extension = validate_filename(original_filename)?;

    if data.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge(data.len()));
    }

    let stored_name = format!("{}.{extension}", Uuid::new_v4().simple());

    tokio::fs::create_dir_all(uploads_dir).await?;
    tokio::fs::write(uploads_dir.join(&stored_name), data).await?;

    Ok(format!("/uploads/{stored_name}"))
}

/// Check the filename and return its lowercased extension.
fn validate_filename(filename: &str) -> Result<String, UploadError> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(UploadError::MissingFilename);
    }

    let extension = Path::new(trimmed)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or(UploadError::MissingFilename)?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType(extension));
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_image_extensions() {
        assert_eq!(validate_filename("photo.JPG").unwrap(), "jpg");
        assert_eq!(validate_filename("weave.png").unwrap(), "png");
        assert_eq!(validate_filename("spin.webp").unwrap(), "webp");
    }

    #[test]
    fn test_rejects_missing_or_bare_filename() {
        assert!(matches!(
            validate_filename(""),
            Err(UploadError::MissingFilename)
        ));
        assert!(matches!(
            validate_filename("no-extension"),
            Err(UploadError::MissingFilename)
        ));
    }

    #[test]
    fn test_rejects_non_image_extension() {
        assert!(matches!(
            validate_filename("script.html"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_filename("notes.pdf"),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_save_image_writes_file_with_new_name() {
        let dir = std::env::temp_dir().join(format!("craftloom-test-{}", Uuid::new_v4().simple()));
        let path = save_image(&dir, "original.png", b"png-bytes")
            .await
            .unwrap();

        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".png"));
        assert!(!path.contains("original"));

        let stored = dir.join(path.trim_start_matches("/uploads/"));
        let contents = tokio::fs::read(&stored).await.unwrap();
        assert_eq!(contents, b"png-bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_image_enforces_size_cap() {
        let dir = std::env::temp_dir();
        let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            save_image(&dir, "big.jpg", &oversized).await,
            Err(UploadError::TooLarge(_))
        ));
    }
}
