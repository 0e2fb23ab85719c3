//! Inlined product images.
//!
//! Images are never stored as files. An uploaded image is encoded into a
//! `data:` URI and kept inside the product record itself.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Path of the logo shown for products without an image.
pub const DEFAULT_IMAGE_PATH: &str = "/static/logo.svg";

/// Errors that can occur when staging an uploaded image.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The upload has no bytes.
    #[error("image upload is empty")]
    Empty,
    /// The upload is not an image.
    #[error("unsupported image type: {0}")]
    NotAnImage(String),
    /// The upload exceeds the configured size limit.
    #[error("image is {size} bytes, the limit is {max} bytes")]
    TooLarge {
        /// Upload size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max: usize,
    },
}

/// An image encoded as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Encode uploaded bytes into a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is empty, larger than `max_bytes`, or its
    /// content type is not `image/*`.
    pub fn from_upload(
        content_type: Option<&str>,
        bytes: &[u8],
        max_bytes: usize,
    ) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }

        let mime = content_type.unwrap_or_default().trim().to_ascii_lowercase();
        if !mime.starts_with("image/") || mime.len() == "image/".len() {
            return Err(ImageError::NotAnImage(mime));
        }

        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Wrap an already-encoded data URI (e.g. one read back from storage).
    #[must_use]
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the data URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the value is an image data URI safe to use as `src`.
    #[must_use]
    pub fn is_image_uri(&self) -> bool {
        self.0.starts_with("data:image/")
    }
}

/// Resolve the `src` for a product image, falling back to the default logo.
#[must_use]
pub fn image_src(image: Option<&ImageData>) -> &str {
    image
        .filter(|image| image.is_image_uri())
        .map_or(DEFAULT_IMAGE_PATH, ImageData::as_str)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_upload_encodes_data_uri() {
        let image = ImageData::from_upload(Some("image/png"), b"abc", 1024).unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,YWJj");
        assert!(image.is_image_uri());
    }

    #[test]
    fn test_from_upload_normalizes_mime() {
        let image = ImageData::from_upload(Some(" Image/JPEG "), b"abc", 1024).unwrap();
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_from_upload_rejects_empty() {
        assert_eq!(
            ImageData::from_upload(Some("image/png"), b"", 1024),
            Err(ImageError::Empty)
        );
    }

    #[test]
    fn test_from_upload_rejects_non_images() {
        assert!(matches!(
            ImageData::from_upload(Some("text/html"), b"<p>", 1024),
            Err(ImageError::NotAnImage(_))
        ));
        assert!(matches!(
            ImageData::from_upload(None, b"abc", 1024),
            Err(ImageError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_from_upload_enforces_limit() {
        assert_eq!(
            ImageData::from_upload(Some("image/png"), &[0; 11], 10),
            Err(ImageError::TooLarge { size: 11, max: 10 })
        );
    }

    #[test]
    fn test_image_src_falls_back_to_logo() {
        assert_eq!(image_src(None), DEFAULT_IMAGE_PATH);
        let bogus = ImageData::from_data_uri("javascript:alert(1)");
        assert_eq!(image_src(Some(&bogus)), DEFAULT_IMAGE_PATH);
        let real = ImageData::from_data_uri("data:image/png;base64,YWJj");
        assert_eq!(image_src(Some(&real)), "data:image/png;base64,YWJj");
    }
}
