//! Handler for POST /api/v1/auth/verify-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;

use crate::dto::auth::VerifyOtpRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Verify an email address with the emailed code; returns a bearer token.
///
/// The email is required: codes are scoped to one account and are never
/// looked up across accounts.
pub async fn verify_otp<A, O, I, S>(
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<VerifyOtpRequest>,
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
        .verify_otp(&request.email, &request.otp_code)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(auth),
        Err(error) => domain_error_response(&error),
    }
}
