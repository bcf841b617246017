//! Signet API server entrypoint.
//!
//! Wires configuration, the MySQL pool, repositories, the notification
//! dispatcher, and the core services, then serves the HTTP app.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use sg_api::app::create_app;
use sg_api::state::AppState;
use sg_core::services::auth::{AuthService, AuthServiceConfig};
use sg_core::services::otp::OtpService;
use sg_core::services::password::PasswordService;
use sg_core::services::profile::ProfileService;
use sg_core::services::token::TokenService;
use sg_infra::{
    create_pool, ChannelOutbox, LocalImageStore, LoggingMailer, Mailer, MySqlAccountRepository,
    MySqlProfileImageRepository, NotificationDispatcher, SmtpMailer,
};
use sg_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.jwt.is_using_default_secret() {
        tracing::warn!(
            event = "default_jwt_secret",
            "JWT_SECRET is unset; using the development default"
        );
    }

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let accounts = Arc::new(MySqlAccountRepository::new(pool.clone()));
    let images = Arc::new(MySqlProfileImageRepository::new(pool));
    let image_store = Arc::new(LocalImageStore::new(&config.storage));

    // Notification outbox: mutations enqueue, the dispatcher task delivers.
    let (outbox, receiver) = ChannelOutbox::channel();
    let outbox = Arc::new(outbox);
    let mailer: Box<dyn Mailer> = if config.email.is_configured() {
        match SmtpMailer::new(&config.email) {
            Ok(mailer) => Box::new(mailer),
            Err(error) => {
                tracing::error!(
                    error = %error,
                    event = "smtp_setup_failed",
                    "Falling back to logging mailer"
                );
                Box::new(LoggingMailer::new())
            }
        }
    } else {
        tracing::warn!(
            event = "email_disabled",
            "Outbound email disabled; OTP codes will be surfaced in responses"
        );
        Box::new(LoggingMailer::new())
    };
    NotificationDispatcher::new(receiver, mailer).spawn();

    let token_service = Arc::new(TokenService::new(config.jwt.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&outbox),
        PasswordService::new(config.password),
        OtpService::new(config.otp),
        Arc::clone(&token_service),
        AuthServiceConfig {
            email_enabled: config.email.enabled,
            password: config.password,
        },
    ));
    let profile_service = Arc::new(ProfileService::new(
        Arc::clone(&accounts),
        images,
        image_store,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        profile_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    tracing::info!(
        address = %bind_address,
        event = "server_starting",
        "Starting Signet API server"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
