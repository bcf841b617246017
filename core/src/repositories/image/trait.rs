//! Profile image repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile_image::ProfileImage;
use crate::errors::DomainError;

/// Repository contract for `ProfileImage` records. Records are
/// cascade-deleted with their owning account at the storage layer.
#[async_trait]
pub trait ProfileImageRepository: Send + Sync {
    /// The most recently uploaded image for an account, if any
    async fn latest_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ProfileImage>, DomainError>;

    /// Persist a new image record
    async fn insert(&self, image: ProfileImage) -> Result<ProfileImage, DomainError>;

    /// Remove an image record; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
