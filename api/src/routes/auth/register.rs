//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Register a new account and queue an OTP verification email.
///
/// The account is created unverified; the response carries `test_otp`
/// only when outbound email is disabled.
pub async fn register<A, O, I, S>(
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(RegisterResponse::from(outcome)),
        Err(error) => domain_error_response(&error),
    }
}
