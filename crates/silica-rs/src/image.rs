//! Micrograph attachments.
//!
//! An [`ImageAttachment`] is a validated pair of raw bytes and a MIME type.
//! Construction is the only gate: once a value exists it is guaranteed to be
//! one of the five accepted formats and at most [`MAX_IMAGE_BYTES`] long, so
//! the rest of the crate never re-checks. [`ImageAttachment::to_inline_part`]
//! turns it into the base64 [`Part`] the Gemini API expects.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Part;
use crate::error::ImageError;

/// Largest accepted attachment, 10 MiB.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// MIME types the analyzer accepts.
pub const ACCEPTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/tiff",
    "image/bmp",
    "image/webp",
];

/// A validated micrograph ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAttachment {
    bytes: Vec<u8>,
    mime: String,
}

impl ImageAttachment {
    /// Validate raw bytes as an attachment.
    ///
    /// The type is checked before the size, so an oversized file of the
    /// wrong kind is reported as the wrong kind.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Result<Self, ImageError> {
        let mime = mime.into();
        if !ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(ImageError::UnsupportedType { mime });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self { bytes, mime })
    }

    /// Read a file and infer its MIME type from the extension
    /// (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let mime = mime_for_extension(path)?;
        let bytes = std::fs::read(path)?;
        Self::new(bytes, mime)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Attachment size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as the inline-data part of a Gemini request.
    pub fn to_inline_part(&self) -> Part {
        Part::inline_data(self.mime.clone(), STANDARD.encode(&self.bytes))
    }
}

fn mime_for_extension(path: &Path) -> Result<&'static str, ImageError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "tif" | "tiff" => Ok("image/tiff"),
        "bmp" => Ok("image/bmp"),
        "webp" => Ok("image/webp"),
        _ => Err(ImageError::UnrecognizedExtension {
            path: path.display().to_string(),
        }),
    }
}
