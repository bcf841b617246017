//! Account state machine implementation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use sg_shared::utils::validation::{
    is_valid_email, mask_email, normalize_email, validate_password_strength,
    PasswordPolicyViolation,
};

use crate::domain::entities::account::Account;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::notification::{Notification, NotificationOutbox};
use crate::services::otp::OtpService;
use crate::services::password::PasswordService;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::types::{ProfileChanges, ProfileUpdateOutcome, RegisterOutcome, ResendOutcome};

/// Drives every account state transition.
///
/// Generic over the repository and the notification outbox so the full
/// lifecycle is testable in memory. Mutations follow one shape: load a
/// snapshot, transition the value, persist once, then queue notifications.
pub struct AuthService<A, O>
where
    A: AccountRepository,
    O: NotificationOutbox,
{
    repository: Arc<A>,
    outbox: Arc<O>,
    password_service: PasswordService,
    otp_service: OtpService,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<A, O> AuthService<A, O>
where
    A: AccountRepository,
    O: NotificationOutbox,
{
    pub fn new(
        repository: Arc<A>,
        outbox: Arc<O>,
        password_service: PasswordService,
        otp_service: OtpService,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            repository,
            outbox,
            password_service,
            otp_service,
            token_service,
            config,
        }
    }

    /// Register a new account.
    ///
    /// The account is created unverified with an immediately issued OTP
    /// challenge. The verification email is queued only after the insert
    /// commits; a delivery failure never fails the registration.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<RegisterOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: String::from("name"),
            }
            .into());
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.check_password_policy(password)?;

        // Friendly pre-check; the storage uniqueness constraint still
        // backs this up against concurrent registrations.
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = self.password_service.hash(password)?;
        let now = Utc::now();
        let mut account = Account::new(name, email.clone(), password_hash, now);
        let code = self.otp_service.issue(&mut account, now);

        let account = self.repository.create(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "account_registered",
            "Registered new account"
        );

        self.queue_notification(Notification::otp(&email, code.clone()));

        Ok(RegisterOutcome {
            account,
            test_otp: self.debug_otp(code),
        })
    }

    /// Verify an account's email with a presented OTP code.
    ///
    /// On success the account becomes verified and a token is issued.
    /// Codes are scoped to the account identified by email; there is no
    /// lookup by code alone.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        self.consume_challenge(&mut account, code, now).await?;

        account.mark_verified(now);
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "email_verified",
            "Email address verified"
        );

        self.issue_auth_response(&email)
    }

    /// Re-issue a verification code for an unverified account.
    ///
    /// Unknown emails resolve to `ResendOutcome::Anonymous` so the caller
    /// can answer identically for registered and unregistered addresses.
    pub async fn resend_otp(&self, email: &str) -> DomainResult<ResendOutcome> {
        let email = normalize_email(email);
        let Some(mut account) = self.repository.find_by_email(&email).await? else {
            return Ok(ResendOutcome::Anonymous);
        };

        if account.is_verified() {
            return Ok(ResendOutcome::AlreadyVerified);
        }

        let now = Utc::now();
        self.otp_service.check_resend_allowed(&account, now)?;

        let code = self.otp_service.issue(&mut account, now);
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "otp_resent",
            "Issued replacement verification code"
        );

        self.queue_notification(Notification::otp(&email, code.clone()));

        Ok(ResendOutcome::Sent {
            test_otp: self.debug_otp(code),
        })
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password fail identically. An unverified
    /// account fails with `EmailNotVerified` and no state change; callers
    /// that want the original convenience behavior follow up with
    /// `issue_verification` as a second, explicit operation.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let Some(mut account) = self.repository.find_by_email(&email).await? else {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_unknown_email",
                "Login attempt for unregistered email"
            );
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_service
            .verify(password, &account.password_hash)
        {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_failed",
                "Failed login attempt"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.is_verified() {
            return Err(AuthError::EmailNotVerified.into());
        }

        let now = Utc::now();
        account.record_login(now);
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "login_success",
            "Successful login"
        );

        self.issue_auth_response(&email)
    }

    /// Issue a fresh verification challenge unconditionally.
    ///
    /// Used after a login attempt against an unverified account, where the
    /// resend rate limit deliberately does not apply. Returns the code when
    /// outbound email is disabled.
    pub async fn issue_verification(&self, email: &str) -> DomainResult<Option<String>> {
        let email = normalize_email(email);
        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        let code = self.otp_service.issue(&mut account, now);
        self.repository.update(account).await?;

        self.queue_notification(Notification::otp(&email, code.clone()));

        Ok(self.debug_otp(code))
    }

    /// Begin a password reset for the caller's own account.
    ///
    /// This flow is not public: the caller must already hold a valid token
    /// for the very email being reset.
    pub async fn forgot_password(
        &self,
        authenticated_email: &str,
        email: &str,
    ) -> DomainResult<Option<String>> {
        let email = normalize_email(email);
        if normalize_email(authenticated_email) != email {
            return Err(AuthError::Forbidden.into());
        }

        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        let code = self.otp_service.issue(&mut account, now);
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "password_reset_requested",
            "Issued password reset code"
        );

        self.queue_notification(Notification::password_reset(&email, code.clone()));

        Ok(self.debug_otp(code))
    }

    /// Complete a password reset with the emailed code.
    ///
    /// Consumes the challenge exactly like `verify_otp`, stores the new
    /// hash, and issues no token: the caller logs in again.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.check_password_policy(new_password)?;

        let email = normalize_email(email);
        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        self.consume_challenge(&mut account, code, now).await?;

        let password_hash = self.password_service.hash(new_password)?;
        account.set_password_hash(password_hash, now);
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "password_reset",
            "Password reset completed"
        );

        Ok(())
    }

    /// Change the password of an authenticated account.
    ///
    /// The confirmation email is best-effort; queueing failures are logged
    /// and never surface to the caller.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.check_password_policy(new_password)?;

        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !self
            .password_service
            .verify(current_password, &account.password_hash)
        {
            return Err(AuthError::WrongCurrentPassword.into());
        }

        if self
            .password_service
            .verify(new_password, &account.password_hash)
        {
            return Err(AuthError::SameAsCurrentPassword.into());
        }

        let now = Utc::now();
        let password_hash = self.password_service.hash(new_password)?;
        account.set_password_hash(password_hash, now);
        let email = account.email.clone();
        self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "password_changed",
            "Password changed"
        );

        self.queue_notification(Notification::password_changed(&email));

        Ok(())
    }

    /// Apply optional profile sub-updates in one transaction.
    ///
    /// Every requested change is validated against the snapshot before the
    /// single repository write, so either all of them commit or none do.
    /// An email change resets verification and opportunistically issues a
    /// challenge for the new address.
    pub async fn update_profile(
        &self,
        account_id: Uuid,
        changes: ProfileChanges,
    ) -> DomainResult<ProfileUpdateOutcome> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        let mut email_changed = false;
        let mut issued_code = None;

        if let Some(name) = &changes.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::RequiredField {
                    field: String::from("name"),
                }
                .into());
            }
            account.rename(name, now);
        }

        if let Some(email) = &changes.email {
            let email = normalize_email(email);
            if !is_valid_email(&email) {
                return Err(ValidationError::InvalidEmail.into());
            }
            if email != account.email {
                if self
                    .repository
                    .email_taken(&email, Some(account.id))
                    .await?
                {
                    return Err(AuthError::EmailTaken.into());
                }
                account.change_email(email, now);
                email_changed = true;
            }
        }

        if let Some(new_password) = &changes.new_password {
            let current = changes.current_password.as_deref().ok_or_else(|| {
                DomainError::from(ValidationError::RequiredField {
                    field: String::from("current_password"),
                })
            })?;
            if !self
                .password_service
                .verify(current, &account.password_hash)
            {
                return Err(AuthError::WrongCurrentPassword.into());
            }
            self.check_password_policy(new_password)?;
            let password_hash = self.password_service.hash(new_password)?;
            account.set_password_hash(password_hash, now);
        }

        if email_changed {
            issued_code = Some(self.otp_service.issue(&mut account, now));
        }

        let account = self.repository.update(account).await?;

        tracing::info!(
            email = %mask_email(&account.email),
            email_changed = email_changed,
            event = "profile_updated",
            "Profile updated"
        );

        if let Some(code) = &issued_code {
            self.queue_notification(Notification::otp(&account.email, code.clone()));
        }

        let test_otp = issued_code.and_then(|code| self.debug_otp(code));
        Ok(ProfileUpdateOutcome {
            account,
            email_changed,
            test_otp,
        })
    }

    /// Access guard: resolve a bearer token to a verified account.
    ///
    /// Runs ahead of every protected operation. The account is re-fetched
    /// so a verification reset (email change) locks the token out even
    /// though the token itself is still validly signed.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Account> {
        let claims = self.token_service.verify(token)?;
        self.authenticate_subject(&claims.sub).await
    }

    /// Resolve an already-verified token subject to a verified account
    pub async fn authenticate_subject(&self, email: &str) -> DomainResult<Account> {
        let account = self
            .repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(TokenError::InvalidToken)?;

        if !account.is_verified() {
            return Err(AuthError::EmailNotVerified.into());
        }

        Ok(account)
    }

    /// Consume an OTP challenge, persisting attempt-counter mutations even
    /// when the guess fails.
    async fn consume_challenge(
        &self,
        account: &mut Account,
        code: &str,
        now: chrono::DateTime<Utc>,
    ) -> DomainResult<()> {
        match self.otp_service.consume(account, code, now) {
            Ok(()) => Ok(()),
            Err(error) => {
                // Wrong guesses mutate the snapshot (counter, possibly a
                // wiped challenge); those must survive the failed call.
                if matches!(
                    error,
                    DomainError::Auth(AuthError::InvalidOtpCode { .. })
                        | DomainError::Auth(AuthError::TooManyOtpAttempts)
                ) {
                    self.repository.update(account.clone()).await?;
                }
                Err(error)
            }
        }
    }

    fn issue_auth_response(&self, email: &str) -> DomainResult<AuthResponse> {
        let issued = self.token_service.issue(email)?;
        Ok(AuthResponse::new(
            issued.access_token,
            issued.expires_in,
            email,
        ))
    }

    fn check_password_policy(&self, password: &str) -> DomainResult<()> {
        validate_password_strength(password, self.config.password.min_length).map_err(
            |violation| {
                DomainError::from(match violation {
                    PasswordPolicyViolation::TooShort => ValidationError::PasswordTooShort {
                        min: self.config.password.min_length,
                    },
                    PasswordPolicyViolation::MissingDigit => ValidationError::PasswordMissingDigit,
                    PasswordPolicyViolation::MissingUppercase => {
                        ValidationError::PasswordMissingUppercase
                    }
                })
            },
        )
    }

    fn queue_notification(&self, notification: Notification) {
        if let Err(error) = self.outbox.enqueue(notification) {
            tracing::warn!(
                error = %error,
                event = "notification_enqueue_failed",
                "Failed to queue notification; continuing"
            );
        }
    }

    fn debug_otp(&self, code: String) -> Option<String> {
        if self.config.email_enabled {
            None
        } else {
            Some(code)
        }
    }
}
