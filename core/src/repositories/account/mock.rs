//! In-memory implementation of `AccountRepository` for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// In-memory account repository backed by a `HashMap`. Mirrors the MySQL
/// implementation's behavior, including the uniqueness-constraint errors.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: String::from("Account"),
            });
        }

        if accounts
            .values()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(AuthError::EmailTaken.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.email == email && Some(a.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(email: &str) -> Account {
        Account::new("Test", email, "hash", Utc::now())
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create(account("a@x.com")).await.unwrap();

        let err = repo.create(account("a@x.com")).await.unwrap_err();
        assert!(err.is_auth(&AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn email_taken_respects_exclusion() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("a@x.com")).await.unwrap();

        assert!(repo.email_taken("a@x.com", None).await.unwrap());
        assert!(!repo
            .email_taken("a@x.com", Some(created.id))
            .await
            .unwrap());
        assert!(!repo.email_taken("b@x.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn update_round_trips_a_snapshot() {
        let repo = InMemoryAccountRepository::new();
        let mut created = repo.create(account("a@x.com")).await.unwrap();

        created.mark_verified(Utc::now());
        repo.update(created.clone()).await.unwrap();

        let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(fetched.is_verified());
    }
}
