//! Profile image storage configuration

use serde::{Deserialize, Serialize};

/// Local filesystem image store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory where uploaded images are written
    pub image_dir: String,

    /// Public base URL under which stored images are served,
    /// e.g. `http://localhost:8080/static/images`
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: String::from("./storage/images"),
            public_base_url: String::from("http://localhost:8080/static/images"),
        }
    }
}
