//! Profile image record owned by an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored profile image reference. The bytes live in the image store;
/// this record only ties a file name to its owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    /// Unique identifier for the image record
    pub id: Uuid,

    /// Owning account; records are removed together with the account
    pub account_id: Uuid,

    /// Opaque file name understood by the image store
    pub file_name: String,

    /// When the image was uploaded
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl ProfileImage {
    /// Creates a new image record for an account
    pub fn new(account_id: Uuid, file_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            file_name: file_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_belongs_to_account() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let image = ProfileImage::new(owner, "abc123.png", now);

        assert_eq!(image.account_id, owner);
        assert_eq!(image.file_name, "abc123.png");
        assert_eq!(image.created_at, now);
    }
}
