//! Local filesystem image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use sg_core::errors::{DomainError, DomainResult};
use sg_core::services::profile::ImageStore;
use sg_shared::config::StorageConfig;

/// Stores profile images as files under a configured directory and serves
/// them from a public base URL. File names are generated server-side; the
/// uploaded name only contributes its extension.
pub struct LocalImageStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.image_dir),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Extract a safe lowercase extension from the uploaded file name
    fn extension_of(original_name: &str) -> &'static str {
        match Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "jpg",
            Some("gif") => "gif",
            Some("webp") => "webp",
            _ => "png",
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(
        &self,
        bytes: &[u8],
        owner_id: Uuid,
        original_name: &str,
    ) -> DomainResult<String> {
        let file_name = format!(
            "{}-{}.{}",
            owner_id,
            Uuid::new_v4(),
            Self::extension_of(original_name)
        );

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create image directory: {}", e),
            })?;

        tokio::fs::write(self.dir.join(&file_name), bytes)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to write image file: {}", e),
            })?;

        Ok(file_name)
    }

    async fn delete(&self, file_name: &str) -> DomainResult<bool> {
        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::Internal {
                message: format!("Failed to delete image file: {}", e),
            }),
        }
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_base_url, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalImageStore {
        let dir = std::env::temp_dir().join(format!("signet-images-{}", Uuid::new_v4()));
        LocalImageStore::new(&StorageConfig {
            image_dir: dir.to_string_lossy().into_owned(),
            public_base_url: String::from("http://localhost:8080/static/images/"),
        })
    }

    #[tokio::test]
    async fn save_writes_and_delete_removes() {
        let store = store();
        let owner = Uuid::new_v4();

        let file_name = store.save(b"bytes", owner, "avatar.JPG").await.unwrap();
        assert!(file_name.starts_with(&owner.to_string()));
        assert!(file_name.ends_with(".jpg"));

        let on_disk = store.dir.join(&file_name);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"bytes");

        assert!(store.delete(&file_name).await.unwrap());
        assert!(!store.delete(&file_name).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_extension_falls_back_to_png() {
        let store = store();
        let file_name = store
            .save(b"bytes", Uuid::new_v4(), "weird.name.bin")
            .await
            .unwrap();
        assert!(file_name.ends_with(".png"));
        store.delete(&file_name).await.unwrap();
    }

    #[test]
    fn url_for_joins_base_without_double_slash() {
        let store = store();
        assert_eq!(
            store.url_for("abc.png"),
            "http://localhost:8080/static/images/abc.png"
        );
    }
}
