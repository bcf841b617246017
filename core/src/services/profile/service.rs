//! Profile service implementation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::profile_image::ProfileImage;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AccountRepository, ProfileImageRepository};

use super::traits::ImageStore;
use super::types::ProfileView;

/// Reads profile views and manages the profile image relation.
pub struct ProfileService<A, I, S>
where
    A: AccountRepository,
    I: ProfileImageRepository,
    S: ImageStore,
{
    account_repository: Arc<A>,
    image_repository: Arc<I>,
    image_store: Arc<S>,
}

impl<A, I, S> ProfileService<A, I, S>
where
    A: AccountRepository,
    I: ProfileImageRepository,
    S: ImageStore,
{
    pub fn new(account_repository: Arc<A>, image_repository: Arc<I>, image_store: Arc<S>) -> Self {
        Self {
            account_repository,
            image_repository,
            image_store,
        }
    }

    /// The profile of an account, including its newest image URL
    pub async fn get_profile(&self, account_id: Uuid) -> DomainResult<ProfileView> {
        let account = self
            .account_repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        self.view_of(&account).await
    }

    /// Build a profile view for an already-loaded account snapshot
    pub async fn view_of(&self, account: &Account) -> DomainResult<ProfileView> {
        let profile_image = self
            .image_repository
            .latest_for_account(account.id)
            .await?
            .map(|image| self.image_store.url_for(&image.file_name));

        Ok(ProfileView {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            email_verified_at: account.email_verified_at,
            updated_at: account.updated_at,
            profile_image,
            has_password: !account.password_hash.is_empty(),
        })
    }

    /// Replace the account's profile image.
    ///
    /// The previous image is removed first; a failure to delete the old
    /// bytes is logged and ignored, since the new upload must not be held
    /// hostage by stale files.
    pub async fn update_image(
        &self,
        account_id: Uuid,
        bytes: &[u8],
        original_name: &str,
    ) -> DomainResult<ProfileView> {
        let mut account = self
            .account_repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if let Some(existing) = self.image_repository.latest_for_account(account_id).await? {
            match self.image_store.delete(&existing.file_name).await {
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(
                        file = %existing.file_name,
                        error = %error,
                        event = "image_delete_failed",
                        "Failed to delete previous profile image"
                    );
                }
            }
            self.image_repository.delete(existing.id).await?;
        }

        let now = Utc::now();
        let file_name = self.image_store.save(bytes, account_id, original_name).await?;
        self.image_repository
            .insert(ProfileImage::new(account_id, file_name, now))
            .await?;

        account.touch(now);
        let account = self.account_repository.update(account).await?;

        tracing::info!(
            account_id = %account_id,
            event = "profile_image_updated",
            "Profile image replaced"
        );

        self.view_of(&account).await
    }
}
