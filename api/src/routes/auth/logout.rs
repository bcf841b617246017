//! Handler for POST /api/v1/auth/logout

use actix_web::HttpResponse;

use sg_shared::types::response::MessageResponse;

/// Logout acknowledgment.
///
/// Tokens are stateless, so there is nothing to invalidate server-side;
/// the client discards its copy.
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Successfully logged out"))
}
