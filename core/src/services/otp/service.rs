//! OTP engine implementation.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use sg_shared::config::OtpConfig;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainResult};

/// Generates and consumes the one-time passcodes attached to accounts.
///
/// All transitions operate on an `Account` value snapshot; the caller
/// persists the result. `now` is always passed in so expiry and rate-limit
/// behavior is deterministic under test.
#[derive(Debug, Clone)]
pub struct OtpService {
    config: OtpConfig,
}

impl OtpService {
    pub fn new(config: OtpConfig) -> Self {
        Self { config }
    }

    /// Generate a numeric code from the OS CSPRNG, zero-padded to the
    /// configured length.
    pub fn generate_code(&self) -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 8];
        rng.fill_bytes(&mut bytes);
        let modulus = 10u64.pow(self.config.code_length as u32);
        // The modulo bias over a u64 is negligible for short numeric codes.
        let code = u64::from_le_bytes(bytes) % modulus;
        format!("{:0width$}", code, width = self.config.code_length)
    }

    /// Install a fresh challenge on the account, overwriting any prior one
    /// and resetting the attempt counter. Returns the code so the caller
    /// can hand it to the notifier.
    pub fn issue(&self, account: &mut Account, now: DateTime<Utc>) -> String {
        let code = self.generate_code();
        let expires_at = now + Duration::minutes(self.config.ttl_minutes);
        account.issue_challenge(code.clone(), expires_at, now);
        code
    }

    /// Validate a presented code against the account's challenge.
    ///
    /// On a wrong guess the attempt counter advances; reaching the limit
    /// wipes the challenge entirely, after which only a re-issue helps.
    /// An expired challenge is left in place so the caller can request a
    /// fresh code. The comparison is constant-time.
    pub fn consume(
        &self,
        account: &mut Account,
        presented_code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let Some((code, expires_at)) = account.active_challenge() else {
            return Err(AuthError::NoActiveChallenge.into());
        };

        if !constant_time_eq(code.as_bytes(), presented_code.as_bytes()) {
            let attempts = account.record_failed_attempt(now);
            if attempts >= self.config.max_attempts {
                account.clear_challenge(now);
                return Err(AuthError::TooManyOtpAttempts.into());
            }
            return Err(AuthError::InvalidOtpCode {
                remaining: self.config.max_attempts - attempts,
            }
            .into());
        }

        if now > expires_at {
            return Err(AuthError::OtpExpired.into());
        }

        account.complete_challenge(now);
        Ok(())
    }

    /// Gate on re-requesting a code: allowed only when no challenge is
    /// active or the active one is inside its final resend window. With the
    /// defaults (10 minute TTL, 1 minute window) that means a code issued
    /// less than 9 minutes ago blocks the request.
    pub fn check_resend_allowed(&self, account: &Account, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some((_, expires_at)) = account.active_challenge() {
            let reopens_at = expires_at - Duration::minutes(self.config.resend_window_minutes);
            if now < reopens_at {
                return Err(AuthError::OtpRateLimited {
                    retry_after_seconds: (reopens_at - now).num_seconds(),
                }
                .into());
            }
        }
        Ok(())
    }
}
