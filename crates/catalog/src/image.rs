//! Product image upload checks.
//!
//! The bytes go straight to the backend's object storage; this module only
//! decides whether a file may be sent and under which object path.

use uuid::Uuid;

use bazaar_core::{DomainError, DomainResult, UserId};

/// Largest accepted image (2 MiB).
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Object-storage bucket product images are uploaded to.
pub const IMAGE_BUCKET: &str = "product-images";

const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Metadata of a file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl ImageUpload {
    pub fn validate(&self) -> DomainResult<()> {
        if !ALLOWED_TYPES.contains(&self.content_type.as_str()) {
            return Err(DomainError::validation(
                "Invalid file type. Use JPG, PNG, or WebP.",
            ));
        }
        if self.size > MAX_IMAGE_BYTES {
            return Err(DomainError::validation("File too large. Max size is 2MB."));
        }
        Ok(())
    }

    /// Extension taken from the file name; `jpg` when there is none.
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => "jpg",
        }
    }

    /// Object path `{owner}/{object}.{ext}` inside [`IMAGE_BUCKET`].
    pub fn object_path(&self, owner: UserId, object: Uuid) -> String {
        format!("{owner}/{object}.{}", self.extension())
    }
}
