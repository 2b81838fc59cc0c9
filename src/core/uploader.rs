//! The image upload seam.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::error::{KeepError, Result};

/// True when `reference` points at device-local storage rather than a
/// durable URL. Mobile image pickers hand back `file://…` and
/// `content://…` URIs; those must be uploaded before the note is
/// persisted, or the reference dies with the device.
pub fn is_local_reference(reference: &str) -> bool {
    reference.starts_with("file") || reference.starts_with("content")
}

/// Moves a local image to durable storage and returns its public URL.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Uploads the image behind `local_reference`.
    ///
    /// # Errors
    ///
    /// [`KeepError::Upload`] when the reference is unreadable or the host
    /// rejects the upload.
    async fn upload(&self, local_reference: &str) -> Result<String>;
}

#[async_trait]
impl<U: AssetUploader + ?Sized> AssetUploader for Arc<U> {
    async fn upload(&self, local_reference: &str) -> Result<String> {
        (**self).upload(local_reference).await
    }
}

/// Uploader that mints URLs under a fixed base without doing any I/O.
///
/// The default collaborator in tests, with an offline switch so upload
/// failure handling can be exercised too.
#[derive(Debug)]
pub struct FixedUploader {
    base_url: String,
    offline: AtomicBool,
    uploads: AtomicUsize,
}

impl FixedUploader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            offline: AtomicBool::new(false),
            uploads: AtomicUsize::new(0),
        }
    }

    /// While set, every upload fails as if the host were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// How many uploads have succeeded.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetUploader for FixedUploader {
    async fn upload(&self, local_reference: &str) -> Result<String> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(KeepError::Upload(format!(
                "asset host unreachable for {local_reference}"
            )));
        }
        let serial = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}/{serial}.jpg", self.base_url))
    }
}
