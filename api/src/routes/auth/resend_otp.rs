//! Handler for POST /api/v1/auth/resend-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::auth::ResendOutcome;
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;
use sg_shared::types::response::MessageResponse;

use crate::dto::auth::ResendOtpRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Re-send the verification code for an unverified account.
///
/// Unknown emails get the same generic answer as successful sends, so the
/// endpoint cannot be used to probe which addresses are registered.
pub async fn resend_otp<A, O, I, S>(
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<ResendOtpRequest>,
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

    match state.auth_service.resend_otp(&request.email).await {
        Ok(ResendOutcome::Sent { test_otp }) => HttpResponse::Ok()
            .json(MessageResponse::new("Verification code sent successfully").with_test_otp(test_otp)),
        Ok(ResendOutcome::AlreadyVerified) => HttpResponse::Ok().json(MessageResponse::new(
            "Your email is already verified. You can log in.",
        )),
        Ok(ResendOutcome::Anonymous) => HttpResponse::Ok().json(MessageResponse::new(
            "If your email is registered, you will receive a verification code.",
        )),
        Err(error) => domain_error_response(&error),
    }
}
