//! Profile view returned to authenticated callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of an account's public profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    /// URL of the newest profile image, if one exists
    pub profile_image: Option<String>,

    /// Whether a password is set (always true for password registrations)
    pub has_password: bool,
}
