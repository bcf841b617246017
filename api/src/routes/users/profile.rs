//! Handlers for GET and PUT /api/v1/users/profile (authenticated)

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::auth::ProfileChanges;
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;

use crate::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// The authenticated account's profile, including its newest image URL
pub async fn get_profile<A, O, I, S>(
    ctx: AuthContext,
    state: web::Data<AppState<A, O, I, S>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    O: NotificationOutbox + 'static,
    I: ProfileImageRepository + 'static,
    S: ImageStore + 'static,
{
    let account = match state.auth_service.authenticate_subject(&ctx.email).await {
        Ok(account) => account,
        Err(error) => return domain_error_response(&error),
    };

    match state.profile_service.view_of(&account).await {
        Ok(view) => HttpResponse::Ok().json(ProfileResponse::new(view)),
        Err(error) => domain_error_response(&error),
    }
}

/// Apply optional profile sub-updates (name, email, password) atomically.
///
/// An email change drops the account back to unverified; the response then
/// asks the caller to verify the new address.
pub async fn update_profile<A, O, I, S>(
    ctx: AuthContext,
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    O: NotificationOutbox + 'static,
    I: ProfileImageRepository + 'static,
    S: ImageStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let account = match state.auth_service.authenticate_subject(&ctx.email).await {
        Ok(account) => account,
        Err(error) => return domain_error_response(&error),
    };

    let request = request.into_inner();
    let changes = ProfileChanges {
        name: request.name,
        email: request.email,
        current_password: request.current_password,
        new_password: request.new_password,
    };

    let outcome = match state.auth_service.update_profile(account.id, changes).await {
        Ok(outcome) => outcome,
        Err(error) => return domain_error_response(&error),
    };

    let view = match state.profile_service.view_of(&outcome.account).await {
        Ok(view) => view,
        Err(error) => return domain_error_response(&error),
    };

    let mut response = ProfileResponse::new(view).with_test_otp(outcome.test_otp);
    if outcome.email_changed {
        response = response
            .with_message("Profile updated. Please verify your new email address.");
    }

    HttpResponse::Ok().json(response)
}
