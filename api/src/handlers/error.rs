//! Domain error to HTTP response mapping.
//!
//! Every core error kind maps to a stable machine-readable code and an
//! HTTP status. Internal details (database messages, mailer failures) are
//! logged server-side and replaced with a generic message on the wire.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use sg_core::errors::{AuthError, DomainError, TokenError};
use sg_shared::types::response::ErrorResponse;

/// Convert a domain error into its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => auth_error_response(auth_error),
        DomainError::Token(token_error) => token_error_response(token_error),
        DomainError::Validation(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new("VALIDATION_ERROR", validation_error.to_string()),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{} not found", resource),
        )),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %error, event = "internal_error", "Request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    let message = error.to_string();
    match error {
        AuthError::EmailTaken => {
            HttpResponse::Conflict().json(ErrorResponse::new("EMAIL_TAKEN", message))
        }
        AuthError::InvalidCredentials => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("INVALID_CREDENTIALS", message))
        }
        AuthError::EmailNotVerified => {
            HttpResponse::Forbidden().json(ErrorResponse::new("EMAIL_NOT_VERIFIED", message))
        }
        AuthError::Forbidden => {
            HttpResponse::Forbidden().json(ErrorResponse::new("FORBIDDEN", message))
        }
        AuthError::AccountNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("ACCOUNT_NOT_FOUND", message))
        }
        AuthError::NoActiveChallenge => {
            HttpResponse::BadRequest().json(ErrorResponse::new("NO_ACTIVE_CHALLENGE", message))
        }
        AuthError::InvalidOtpCode { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_OTP_CODE", message))
        }
        AuthError::OtpExpired => {
            HttpResponse::BadRequest().json(ErrorResponse::new("OTP_EXPIRED", message))
        }
        AuthError::TooManyOtpAttempts => {
            HttpResponse::BadRequest().json(ErrorResponse::new("TOO_MANY_ATTEMPTS", message))
        }
        AuthError::OtpRateLimited { .. } => {
            HttpResponse::TooManyRequests().json(ErrorResponse::new("RATE_LIMITED", message))
        }
        AuthError::WrongCurrentPassword => {
            HttpResponse::BadRequest().json(ErrorResponse::new("WRONG_CURRENT_PASSWORD", message))
        }
        AuthError::SameAsCurrentPassword => {
            HttpResponse::BadRequest().json(ErrorResponse::new("SAME_AS_CURRENT_PASSWORD", message))
        }
    }
}

fn token_error_response(error: &TokenError) -> HttpResponse {
    let message = error.to_string();
    match error {
        TokenError::TokenExpired => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("TOKEN_EXPIRED", message))
        }
        TokenError::InvalidToken => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("INVALID_TOKEN", message))
        }
        TokenError::TokenGenerationFailed => HttpResponse::InternalServerError().json(
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
        ),
    }
}

/// Convert `validator` DTO failures into a 400 with field details
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "VALIDATION_ERROR",
        format!("Invalid request data in field(s): {}", fields.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn status_codes_match_error_kinds() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (AuthError::EmailTaken.into(), StatusCode::CONFLICT),
            (AuthError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AuthError::EmailNotVerified.into(), StatusCode::FORBIDDEN),
            (AuthError::AccountNotFound.into(), StatusCode::NOT_FOUND),
            (
                AuthError::OtpRateLimited {
                    retry_after_seconds: 60,
                }
                .into(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AuthError::InvalidOtpCode { remaining: 2 }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::TooManyOtpAttempts.into(), StatusCode::BAD_REQUEST),
            (TokenError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (
                DomainError::Database {
                    message: String::from("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = domain_error_response(&error);
            assert_eq!(response.status(), expected, "for {:?}", error);
        }
    }
}
