//! Shared application state handed to every handler.

use std::sync::Arc;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::auth::AuthService;
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::{ImageStore, ProfileService};
use sg_core::services::token::TokenService;

/// Application state holding the wired service graph.
///
/// Generic over the repository, outbox, and storage implementations so the
/// same route handlers run against MySQL in production and the in-memory
/// fakes in tests.
pub struct AppState<A, O, I, S>
where
    A: AccountRepository,
    O: NotificationOutbox,
    I: ProfileImageRepository,
    S: ImageStore,
{
    pub auth_service: Arc<AuthService<A, O>>,
    pub profile_service: Arc<ProfileService<A, I, S>>,
    pub token_service: Arc<TokenService>,
}
