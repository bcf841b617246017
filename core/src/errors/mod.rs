//! Domain-specific error types and error handling.
//!
//! Every core operation returns a typed `DomainResult`; the presentation
//! layer maps error kinds to transport codes. Messages here never reveal
//! whether an email address is registered on the anti-enumeration paths.

use thiserror::Error;

/// Authentication and account lifecycle errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account not found")]
    AccountNotFound,

    #[error("No active verification code for this account")]
    NoActiveChallenge,

    #[error("Invalid verification code. {remaining} attempt(s) remaining")]
    InvalidOtpCode { remaining: i32 },

    #[error("Verification code has expired")]
    OtpExpired,

    #[error("Too many failed attempts. Request a new code")]
    TooManyOtpAttempts,

    #[error("Please wait {retry_after_seconds} seconds before requesting another code")]
    OtpRateLimited { retry_after_seconds: i64 },

    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    #[error("New password must be different from the current password")]
    SameAsCurrentPassword,

    #[error("Operation not permitted for this account")]
    Forbidden,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password must contain at least one digit")]
    PasswordMissingDigit,

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Convenience predicate for matching a specific auth error kind
    pub fn is_auth(&self, expected: &AuthError) -> bool {
        matches!(self, DomainError::Auth(e) if e == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_carry_remaining_attempts() {
        let error = AuthError::InvalidOtpCode { remaining: 3 };
        assert!(error.to_string().contains("3 attempt(s) remaining"));
    }

    #[test]
    fn domain_error_bridges_specific_kinds() {
        let error: DomainError = AuthError::EmailTaken.into();
        assert!(error.is_auth(&AuthError::EmailTaken));
        assert_eq!(error.to_string(), "Email already registered");

        let error: DomainError = TokenError::TokenExpired.into();
        assert_eq!(error.to_string(), "Token expired");
    }

    #[test]
    fn credentials_error_does_not_name_the_email() {
        // The same message covers unknown email and wrong password.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
    }
}
