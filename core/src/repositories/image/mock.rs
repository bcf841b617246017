//! In-memory implementation of `ProfileImageRepository` for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile_image::ProfileImage;
use crate::errors::DomainError;

use super::trait_::ProfileImageRepository;

/// In-memory image repository backed by a `HashMap`
#[derive(Default)]
pub struct InMemoryProfileImageRepository {
    images: Arc<RwLock<HashMap<Uuid, ProfileImage>>>,
}

impl InMemoryProfileImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileImageRepository for InMemoryProfileImageRepository {
    async fn latest_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ProfileImage>, DomainError> {
        let images = self.images.read().await;
        Ok(images
            .values()
            .filter(|i| i.account_id == account_id)
            .max_by_key(|i| i.created_at)
            .cloned())
    }

    async fn insert(&self, image: ProfileImage) -> Result<ProfileImage, DomainError> {
        let mut images = self.images.write().await;
        images.insert(image.id, image.clone());
        Ok(image)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut images = self.images.write().await;
        Ok(images.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn latest_picks_newest_by_created_at() {
        let repo = InMemoryProfileImageRepository::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();

        repo.insert(ProfileImage::new(owner, "old.png", now - Duration::hours(1)))
            .await
            .unwrap();
        let newest = repo
            .insert(ProfileImage::new(owner, "new.png", now))
            .await
            .unwrap();

        let latest = repo.latest_for_account(owner).await.unwrap().unwrap();
        assert_eq!(latest.id, newest.id);
        assert_eq!(latest.file_name, "new.png");
    }

    #[tokio::test]
    async fn latest_is_none_for_unknown_account() {
        let repo = InMemoryProfileImageRepository::new();
        assert!(repo
            .latest_for_account(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
