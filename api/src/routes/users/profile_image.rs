//! Handler for PUT /api/v1/users/profile/image (authenticated, multipart)

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt as _;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;
use sg_shared::types::response::ErrorResponse;

use crate::dto::profile::ProfileResponse;
use crate::handlers::domain_error_response;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Uploads above this size are rejected before they hit the store
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Replace the authenticated account's profile image.
///
/// Expects a multipart form with a `profile_image` file field. The old
/// image is removed best-effort before the new one is recorded.
pub async fn update_profile_image<A, O, I, S>(
    ctx: AuthContext,
    state: web::Data<AppState<A, O, I, S>>,
    mut payload: Multipart,
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

    let mut bytes: Vec<u8> = Vec::new();
    let mut file_name = String::from("upload");
    let mut found = false;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::new("VALIDATION_ERROR", "Malformed upload"));
            }
        };

        if field.name() != "profile_image" {
            continue;
        }
        found = true;

        if let Some(name) = field.content_disposition().get_filename() {
            file_name = name.to_string();
        }

        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => {
                    if bytes.len() + data.len() > MAX_IMAGE_BYTES {
                        return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(
                            "PAYLOAD_TOO_LARGE",
                            "Profile image exceeds the 5 MB limit",
                        ));
                    }
                    bytes.extend_from_slice(&data);
                }
                Err(_) => {
                    return HttpResponse::BadRequest()
                        .json(ErrorResponse::new("VALIDATION_ERROR", "Malformed upload"));
                }
            }
        }
    }

    if !found || bytes.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "VALIDATION_ERROR",
            "A profile_image file is required",
        ));
    }

    match state
        .profile_service
        .update_image(account.id, &bytes, &file_name)
        .await
    {
        Ok(view) => HttpResponse::Ok().json(ProfileResponse::new(view)),
        Err(error) => domain_error_response(&error),
    }
}
