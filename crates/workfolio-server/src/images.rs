//! Storage seam for uploaded profile pictures. Handlers talk to the
//! [`ImageStore`] trait; the default implementation writes to the local
//! filesystem and relies on the static file layer to serve the results.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::AppError;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub public_url: String,
    pub storage_id: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an image buffer under `folder/id` and returns its public URL
    /// plus the storage reference used for later replacement or deletion.
    async fn upload(
        &self,
        bytes: &[u8],
        folder: &str,
        id: &str,
        format: ImageFormat,
    ) -> Result<StoredImage, AppError>;

    async fn delete(&self, storage_id: &str) -> Result<(), AppError>;
}

pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(root: &str, base_url: &str) -> Self {
        Self {
            root: PathBuf::from(root),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(
        &self,
        bytes: &[u8],
        folder: &str,
        id: &str,
        format: ImageFormat,
    ) -> Result<StoredImage, AppError> {
        let storage_id = format!("{folder}/{id}.{}", format.extension());
        let path = self.root.join(&storage_id);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to prepare upload dir: {}", e)))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to store image: {}", e)))?;

        Ok(StoredImage {
            public_url: format!("{}/uploads/{}", self.base_url, storage_id),
            storage_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.root.join(storage_id)).await {
            Ok(()) => Ok(()),
            // a missing file is already deleted as far as callers care
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Failed to delete image: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_mapping() {
        assert_eq!(ImageFormat::from_content_type("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_content_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_content_type("image/gif"), None);
        assert_eq!(ImageFormat::from_content_type("application/pdf"), None);
    }
}
