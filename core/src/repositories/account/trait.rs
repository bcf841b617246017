//! Account repository trait defining the interface for account persistence.
//!
//! Implementations must enforce email uniqueness with a storage-level
//! constraint, not just a pre-check: `create` and `update` return
//! `AuthError::EmailTaken` when another row already owns the address, which
//! closes the check-then-act race between concurrent registrations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository contract for `Account` persistence operations.
///
/// Accounts are stored by normalized (lowercase) email; callers normalize
/// before lookup. Each `update` call persists a full snapshot in a single
/// statement so that OTP counter mutations are atomic per row.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account.
    ///
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist an updated snapshot of an existing account.
    ///
    /// Returns `DomainError::NotFound` if the account no longer exists and
    /// `AuthError::EmailTaken` if an email change collides with another row.
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete an account; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check whether an email is held by any account other than `exclude`
    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DomainError>;
}
