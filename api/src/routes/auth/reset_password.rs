//! Handler for POST /api/v1/auth/reset-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;
use sg_shared::types::response::MessageResponse;

use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Complete a password reset with the emailed code.
///
/// No token is issued; the caller logs in again with the new password.
pub async fn reset_password<A, O, I, S>(
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&request.email, &request.otp_code, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Password has been successfully reset. You can now log in with your new password.",
        )),
        Err(error) => domain_error_response(&error),
    }
}
