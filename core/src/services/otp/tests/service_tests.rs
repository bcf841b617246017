//! Unit tests for the OTP engine

use chrono::{Duration, Utc};
use sg_shared::config::OtpConfig;
use std::collections::HashSet;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::services::otp::OtpService;

fn service() -> OtpService {
    OtpService::new(OtpConfig::default())
}

fn account() -> Account {
    Account::new("Test", "test@example.com", "hash", Utc::now())
}

fn unwrap_auth(error: DomainError) -> AuthError {
    match error {
        DomainError::Auth(e) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[test]
fn generated_codes_are_six_ascii_digits() {
    let service = service();
    for _ in 0..100 {
        let code = service.generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn generated_codes_are_not_trivially_predictable() {
    let service = service();
    let codes: HashSet<String> = (0..200).map(|_| service.generate_code()).collect();
    // 200 draws from a million-value space should almost never collide much;
    // a heavily repeating sequence would indicate a broken source.
    assert!(codes.len() > 150, "only {} unique codes", codes.len());
}

#[test]
fn issue_sets_challenge_and_resets_attempts() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    account.failed_otp_attempts = 3;

    let code = service.issue(&mut account, now);

    let (stored, expires_at) = account.active_challenge().unwrap();
    assert_eq!(stored, code);
    assert_eq!(expires_at, now + Duration::minutes(10));
    assert_eq!(account.failed_otp_attempts, 0);
}

#[test]
fn consume_succeeds_and_clears_challenge() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    let code = service.issue(&mut account, now);

    service
        .consume(&mut account, &code, now + Duration::minutes(5))
        .unwrap();

    assert!(account.active_challenge().is_none());
    assert_eq!(account.failed_otp_attempts, 0);
}

#[test]
fn consume_without_challenge_fails() {
    let service = service();
    let mut account = account();

    let error = service
        .consume(&mut account, "123456", Utc::now())
        .unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::NoActiveChallenge);
}

#[test]
fn blank_stored_code_counts_as_no_challenge() {
    let service = service();
    let mut account = account();
    account.otp_code = Some(String::new());
    account.otp_expires_at = Some(Utc::now() + Duration::minutes(10));

    let error = service
        .consume(&mut account, "123456", Utc::now())
        .unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::NoActiveChallenge);
}

#[test]
fn wrong_guess_reports_remaining_attempts() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    service.issue(&mut account, now);

    let error = service.consume(&mut account, "000000", now).unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::InvalidOtpCode { remaining: 4 });
    assert_eq!(account.failed_otp_attempts, 1);
    assert!(account.active_challenge().is_some());
}

#[test]
fn fifth_wrong_guess_wipes_the_challenge() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    let code = service.issue(&mut account, now);

    for attempt in 1..=4 {
        let error = service.consume(&mut account, "000000", now).unwrap_err();
        assert_eq!(
            unwrap_auth(error),
            AuthError::InvalidOtpCode {
                remaining: 5 - attempt
            }
        );
    }

    let error = service.consume(&mut account, "000000", now).unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::TooManyOtpAttempts);
    assert!(account.active_challenge().is_none());

    // Even the correct code is dead now; a re-issue is required.
    let error = service.consume(&mut account, &code, now).unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::NoActiveChallenge);

    let fresh = service.issue(&mut account, now);
    service.consume(&mut account, &fresh, now).unwrap();
}

#[test]
fn expired_code_fails_but_challenge_stays() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    let code = service.issue(&mut account, now);

    let error = service
        .consume(&mut account, &code, now + Duration::minutes(11))
        .unwrap_err();
    assert_eq!(unwrap_auth(error), AuthError::OtpExpired);
    // Left as-is so the caller can request a fresh one.
    assert!(account.active_challenge().is_some());
}

#[test]
fn resend_blocked_inside_first_nine_minutes() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    service.issue(&mut account, now);

    let error = service
        .check_resend_allowed(&account, now + Duration::minutes(1))
        .unwrap_err();
    match unwrap_auth(error) {
        AuthError::OtpRateLimited {
            retry_after_seconds,
        } => assert_eq!(retry_after_seconds, 8 * 60),
        other => panic!("expected rate limit error, got {:?}", other),
    }
}

#[test]
fn resend_allowed_in_final_minute_and_after_expiry() {
    let service = service();
    let mut account = account();
    let now = Utc::now();
    service.issue(&mut account, now);

    service
        .check_resend_allowed(&account, now + Duration::minutes(9))
        .unwrap();
    service
        .check_resend_allowed(&account, now + Duration::minutes(12))
        .unwrap();
}

#[test]
fn resend_allowed_when_no_challenge_active() {
    let service = service();
    let account = account();
    service.check_resend_allowed(&account, Utc::now()).unwrap();
}
