//! Account entity representing a registered user of the Signet system.
//!
//! Accounts are plain value snapshots: services load one from the
//! repository, apply transitions on the value, and persist the result in a
//! single explicit write. Nothing here touches storage or the clock; the
//! caller supplies `now` so every transition is deterministic under test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity for an email-identified user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, assigned at creation and never reused
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique lowercase email address; the token subject
    pub email: String,

    /// Opaque bcrypt hash; never logged in cleartext
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// When the email was verified; None means the account is unverified
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Outstanding verification code, if a challenge is active
    pub otp_code: Option<String>,

    /// Expiry of the outstanding code; set and cleared together with it
    pub otp_expires_at: Option<DateTime<Utc>>,

    /// Wrong guesses against the current challenge
    pub failed_otp_attempts: i32,

    /// Timestamp of the most recent successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// Bumped on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            email_verified_at: None,
            otp_code: None,
            otp_expires_at: None,
            failed_otp_attempts: 0,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the email address has been verified
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// The outstanding challenge, if one exists.
    ///
    /// A blank code counts as "no active challenge"; some stores clear the
    /// code to an empty string rather than NULL.
    pub fn active_challenge(&self) -> Option<(&str, DateTime<Utc>)> {
        match (self.otp_code.as_deref(), self.otp_expires_at) {
            (Some(code), Some(expires_at)) if !code.trim().is_empty() => Some((code, expires_at)),
            _ => None,
        }
    }

    /// Install a fresh challenge, overwriting any prior one and resetting
    /// the attempt counter. At most one challenge is active per account.
    pub fn issue_challenge(
        &mut self,
        code: impl Into<String>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        self.otp_code = Some(code.into());
        self.otp_expires_at = Some(expires_at);
        self.failed_otp_attempts = 0;
        self.updated_at = now;
    }

    /// Wipe the challenge without consuming it (too many failed attempts)
    pub fn clear_challenge(&mut self, now: DateTime<Utc>) {
        self.otp_code = None;
        self.otp_expires_at = None;
        self.updated_at = now;
    }

    /// Record one wrong guess; returns the new attempt count
    pub fn record_failed_attempt(&mut self, now: DateTime<Utc>) -> i32 {
        self.failed_otp_attempts += 1;
        self.updated_at = now;
        self.failed_otp_attempts
    }

    /// Consume the challenge after a successful match
    pub fn complete_challenge(&mut self, now: DateTime<Utc>) {
        self.failed_otp_attempts = 0;
        self.clear_challenge(now);
    }

    /// Mark the email address as verified
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified_at = Some(now);
        self.updated_at = now;
    }

    /// Record a successful login
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>, now: DateTime<Utc>) {
        self.password_hash = password_hash.into();
        self.updated_at = now;
    }

    /// Change the email address. Verification does not carry over: the
    /// account drops back to unverified until the new address is confirmed.
    pub fn change_email(&mut self, email: impl Into<String>, now: DateTime<Utc>) {
        self.email = email.into();
        self.email_verified_at = None;
        self.updated_at = now;
    }

    /// Update the display name
    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.name = name.into();
        self.updated_at = now;
    }

    /// Bump `updated_at` without any other change (e.g. after an image swap)
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(now: DateTime<Utc>) -> Account {
        Account::new("Alice", "alice@example.com", "$2b$12$hash", now)
    }

    #[test]
    fn new_account_is_unverified_with_no_challenge() {
        let now = Utc::now();
        let account = account(now);

        assert!(!account.is_verified());
        assert!(account.active_challenge().is_none());
        assert_eq!(account.failed_otp_attempts, 0);
        assert!(account.last_login_at.is_none());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn issue_challenge_overwrites_and_resets_attempts() {
        let now = Utc::now();
        let mut account = account(now);

        account.issue_challenge("111111", now + Duration::minutes(10), now);
        account.record_failed_attempt(now);
        assert_eq!(account.failed_otp_attempts, 1);

        let later = now + Duration::minutes(9);
        account.issue_challenge("222222", later + Duration::minutes(10), later);

        let (code, expires_at) = account.active_challenge().unwrap();
        assert_eq!(code, "222222");
        assert_eq!(expires_at, later + Duration::minutes(10));
        assert_eq!(account.failed_otp_attempts, 0);
    }

    #[test]
    fn blank_code_is_not_an_active_challenge() {
        let now = Utc::now();
        let mut account = account(now);

        account.otp_code = Some(String::new());
        account.otp_expires_at = Some(now + Duration::minutes(10));
        assert!(account.active_challenge().is_none());

        account.otp_code = Some("123456".into());
        account.otp_expires_at = None;
        assert!(account.active_challenge().is_none());
    }

    #[test]
    fn complete_challenge_clears_state() {
        let now = Utc::now();
        let mut account = account(now);
        account.issue_challenge("123456", now + Duration::minutes(10), now);
        account.record_failed_attempt(now);

        account.complete_challenge(now);
        assert!(account.active_challenge().is_none());
        assert_eq!(account.failed_otp_attempts, 0);
    }

    #[test]
    fn change_email_drops_verification() {
        let now = Utc::now();
        let mut account = account(now);
        account.mark_verified(now);
        assert!(account.is_verified());

        account.change_email("alice@new.example.com", now);
        assert_eq!(account.email, "alice@new.example.com");
        assert!(!account.is_verified());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let now = Utc::now();
        let account = account(now);
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$hash"));
    }
}
