//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::errors::{AuthError, DomainError};
use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;

use crate::dto::auth::{LoginRequest, UnverifiedLoginResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Authenticate with email and password; returns a bearer token.
///
/// A login against an unverified account is denied, and a fresh
/// verification code is then issued as a second, explicit operation
/// before the 403 goes out.
pub async fn login<A, O, I, S>(
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<LoginRequest>,
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

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(auth),
        Err(DomainError::Auth(AuthError::EmailNotVerified)) => {
            // The denial above changed nothing; the re-issue is its own
            // state transition with its own failure handling.
            let test_otp = match state.auth_service.issue_verification(&request.email).await {
                Ok(test_otp) => test_otp,
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        event = "login_reissue_failed",
                        "Could not issue verification code after unverified login"
                    );
                    None
                }
            };
            HttpResponse::Forbidden().json(UnverifiedLoginResponse::new(test_otp))
        }
        Err(error) => domain_error_response(&error),
    }
}
