//! Unit tests for the token service

use chrono::{Duration, Utc};
use sg_shared::config::JwtConfig;

use crate::errors::{DomainError, TokenError};
use crate::services::token::TokenService;

fn service() -> TokenService {
    TokenService::new(JwtConfig {
        secret: String::from("test-secret"),
        ttl_minutes: 30,
        issuer: String::from("signet"),
    })
}

fn unwrap_token_error(error: DomainError) -> TokenError {
    match error {
        DomainError::Token(e) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn issue_then_verify_returns_subject() {
    let service = service();
    let issued = service.issue("a@x.com").unwrap();

    assert_eq!(issued.expires_in, 30 * 60);

    let claims = service.verify(&issued.access_token).unwrap();
    assert_eq!(claims.sub, "a@x.com");
    assert_eq!(claims.iss, "signet");
}

#[test]
fn token_valid_one_minute_before_expiry() {
    let service = service();
    // Issued 29 minutes ago with a 30 minute lifetime: still good.
    let issued = service
        .issue_at("a@x.com", Utc::now() - Duration::minutes(29))
        .unwrap();

    assert!(service.verify(&issued.access_token).is_ok());
}

#[test]
fn token_expired_one_minute_after_expiry() {
    let service = service();
    // Issued 31 minutes ago with a 30 minute lifetime: lapsed.
    let issued = service
        .issue_at("a@x.com", Utc::now() - Duration::minutes(31))
        .unwrap();

    let error = service.verify(&issued.access_token).unwrap_err();
    assert_eq!(unwrap_token_error(error), TokenError::TokenExpired);
}

#[test]
fn tampered_token_is_rejected() {
    let service = service();
    let issued = service.issue("a@x.com").unwrap();

    let mut tampered = issued.access_token.clone();
    tampered.pop();
    tampered.push('A');

    let error = service.verify(&tampered).unwrap_err();
    assert_eq!(unwrap_token_error(error), TokenError::InvalidToken);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let service = service();
    let other = TokenService::new(JwtConfig {
        secret: String::from("other-secret"),
        ttl_minutes: 30,
        issuer: String::from("signet"),
    });

    let issued = other.issue("a@x.com").unwrap();
    let error = service.verify(&issued.access_token).unwrap_err();
    assert_eq!(unwrap_token_error(error), TokenError::InvalidToken);
}

#[test]
fn token_with_wrong_issuer_is_rejected() {
    let service = service();
    let other = TokenService::new(JwtConfig {
        secret: String::from("test-secret"),
        ttl_minutes: 30,
        issuer: String::from("someone-else"),
    });

    let issued = other.issue("a@x.com").unwrap();
    let error = service.verify(&issued.access_token).unwrap_err();
    assert_eq!(unwrap_token_error(error), TokenError::InvalidToken);
}

#[test]
fn garbage_input_is_rejected() {
    let service = service();
    let error = service.verify("not-a-jwt").unwrap_err();
    assert_eq!(unwrap_token_error(error), TokenError::InvalidToken);
}
