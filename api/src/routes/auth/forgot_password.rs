//! Handler for POST /api/v1/auth/forgot-password (authenticated)

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;
use sg_shared::types::response::MessageResponse;

use crate::dto::auth::ForgotPasswordRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Request a password reset code for the caller's own account.
///
/// This is not a public flow: the bearer token must belong to the very
/// email being reset.
pub async fn forgot_password<A, O, I, S>(
    ctx: AuthContext,
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<ForgotPasswordRequest>,
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

    // Re-check the account behind the token; it must still be verified.
    if let Err(error) = state.auth_service.authenticate_subject(&ctx.email).await {
        return domain_error_response(&error);
    }

    match state
        .auth_service
        .forgot_password(&ctx.email, &request.email)
        .await
    {
        Ok(test_otp) => HttpResponse::Ok().json(
            MessageResponse::new("Password reset instructions sent to your email")
                .with_test_otp(test_otp),
        ),
        Err(error) => domain_error_response(&error),
    }
}
