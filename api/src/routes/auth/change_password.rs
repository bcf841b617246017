//! Handler for POST /api/v1/auth/change-password (authenticated)

use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;
use sg_shared::types::response::MessageResponse;

use crate::dto::auth::ChangePasswordRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Change the authenticated account's password.
///
/// The confirmation email is best-effort; a delivery problem never turns
/// a successful change into an error.
pub async fn change_password<A, O, I, S>(
    ctx: AuthContext,
    state: web::Data<AppState<A, O, I, S>>,
    request: web::Json<ChangePasswordRequest>,
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

    // Re-check the account behind the token before touching credentials.
    let account = match state.auth_service.authenticate_subject(&ctx.email).await {
        Ok(account) => account,
        Err(error) => return domain_error_response(&error),
    };

    match state
        .auth_service
        .change_password(account.id, &request.current_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Password has been successfully changed",
        )),
        Err(error) => domain_error_response(&error),
    }
}
