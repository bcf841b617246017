//! JWT claim set carried by access tokens.
//!
//! Tokens are stateless bearer credentials: the claim set is the entire
//! server-side knowledge about a session. Verification re-fetches the
//! account by subject; there is no revocation list.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims embedded in an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email address
    pub sub: String,

    /// Issued-at, seconds since the epoch
    pub iat: i64,

    /// Expiry, seconds since the epoch
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Build the claim set for a token issued now with the given lifetime
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Self {
        let expires_at = issued_at + Duration::minutes(ttl_minutes);
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.into(),
        }
    }

    /// Seconds of validity remaining relative to `now` (zero when lapsed)
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_subject_and_expiry() {
        let now = Utc::now();
        let claims = Claims::new("a@x.com", "signet", now, 30);

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.iss, "signet");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(claims.seconds_until_expiry(now) > 29 * 60);
    }

    #[test]
    fn expired_claims_report_zero_remaining() {
        let issued = Utc::now() - Duration::minutes(31);
        let claims = Claims::new("a@x.com", "signet", issued, 30);
        assert_eq!(claims.seconds_until_expiry(Utc::now()), 0);
    }
}
