//! Input validation utilities
//!
//! Boundary-level checks applied before any domain operation runs: email
//! shape, password strength, and display helpers for log-safe email output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check; full RFC 5322 validation is not attempted.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Check if an email address looks valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_RE.is_match(email)
}

/// Canonical form used for storage and lookup: trimmed and lowercased.
/// The uniqueness policy is case-insensitive, fixed at account creation.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging, keeping only the first character of
/// the local part and the domain: `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", head, domain)
        }
        None => String::from("***"),
    }
}

/// Reasons a candidate password fails the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicyViolation {
    TooShort,
    MissingDigit,
    MissingUppercase,
}

/// Enforce the password policy: minimum length, at least one ASCII digit,
/// at least one uppercase letter. Returns the first violation found.
pub fn validate_password_strength(
    password: &str,
    min_length: usize,
) -> Result<(), PasswordPolicyViolation> {
    if password.chars().count() < min_length {
        return Err(PasswordPolicyViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyViolation::MissingDigit);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordPolicyViolation::MissingUppercase);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn normalization_lowercases_and_trims() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }

    #[test]
    fn masking_keeps_domain_only() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn password_policy() {
        assert_eq!(
            validate_password_strength("Sh0rt", 8),
            Err(PasswordPolicyViolation::TooShort)
        );
        assert_eq!(
            validate_password_strength("NoDigitsHere", 8),
            Err(PasswordPolicyViolation::MissingDigit)
        );
        assert_eq!(
            validate_password_strength("nouppercase1", 8),
            Err(PasswordPolicyViolation::MissingUppercase)
        );
        assert_eq!(validate_password_strength("Passw0rd1", 8), Ok(()));
    }
}
