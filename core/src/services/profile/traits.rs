//! Image storage trait consumed by the profile service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

/// Opaque byte storage for profile images. The core only ever sees file
/// names; where the bytes live is the implementation's business.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist image bytes for an owner; returns the stored file name
    async fn save(
        &self,
        bytes: &[u8],
        owner_id: Uuid,
        original_name: &str,
    ) -> DomainResult<String>;

    /// Remove a stored image; returns whether anything was deleted
    async fn delete(&self, file_name: &str) -> DomainResult<bool>;

    /// Public URL under which a stored image is served
    fn url_for(&self, file_name: &str) -> String;
}
