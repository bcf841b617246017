//! Application factory.
//!
//! Assembles the actix-web `App` from shared state: middleware, route
//! tree, health endpoint, and the default 404 handler.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use sg_core::repositories::{AccountRepository, ProfileImageRepository};
use sg_core::services::notification::NotificationOutbox;
use sg_core::services::profile::ImageStore;

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{
    change_password::change_password, forgot_password::forgot_password, login::login,
    logout::logout, register::register, resend_otp::resend_otp, reset_password::reset_password,
    verify_otp::verify_otp,
};
use crate::routes::users::{
    profile::{get_profile, update_profile},
    profile_image::update_profile_image,
};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<A, O, I, S>(
    app_state: web::Data<AppState<A, O, I, S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    O: NotificationOutbox + 'static,
    I: ProfileImageRepository + 'static,
    S: ImageStore + 'static,
{
    let cors = create_cors();
    let jwt = || JwtAuth::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state.clone())
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<A, O, I, S>))
                        .route("/login", web::post().to(login::<A, O, I, S>))
                        .route("/logout", web::post().to(logout))
                        .route("/verify-otp", web::post().to(verify_otp::<A, O, I, S>))
                        .route("/resend-otp", web::post().to(resend_otp::<A, O, I, S>))
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<A, O, I, S>),
                        )
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::<A, O, I, S>).wrap(jwt()),
                        )
                        .route(
                            "/change-password",
                            web::post().to(change_password::<A, O, I, S>).wrap(jwt()),
                        ),
                )
                .service(
                    web::scope("/users")
                        .route("/profile", web::get().to(get_profile::<A, O, I, S>).wrap(jwt()))
                        .route(
                            "/profile",
                            web::put().to(update_profile::<A, O, I, S>).wrap(jwt()),
                        )
                        .route(
                            "/profile/image",
                            web::put().to(update_profile_image::<A, O, I, S>).wrap(jwt()),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "signet-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
