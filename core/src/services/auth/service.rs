//! Authentication service: the narrow boundary the transports call
//!
//! The HTTP handlers and the console loop both go through this service.
//! It validates the phone format before any store lookup, then runs the
//! eligibility check and the state transition inside one store critical
//! section so concurrent requests for the same phone number cannot bypass
//! the cooldown or the daily quota.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use otp_shared::config::OtpConfig;
use otp_shared::phone::{is_valid_phone, mask_phone};

use crate::engine::{OtpEngine, SendEligibility};
use crate::errors::{AuthError, DomainResult, RateLimitReason};
use crate::repositories::StateStore;
use crate::store::UserStore;

/// Result of a successful code request
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The generated code. Echoed to the caller because no real SMS
    /// delivery exists; this mirrors the reference system's debug
    /// affordance and is not a security-sound default for production.
    pub code: String,

    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Seconds until the next send is allowed
    pub resend_after_secs: i64,
}

/// OTP login service over a shared user store
pub struct AuthService<S: StateStore> {
    store: Arc<UserStore<S>>,
    engine: OtpEngine,
}

impl<S: StateStore> AuthService<S> {
    /// Create a service over the given store and lifecycle configuration
    pub fn new(store: Arc<UserStore<S>>, config: OtpConfig) -> Self {
        Self {
            store,
            engine: OtpEngine::new(config),
        }
    }

    /// Request a verification code for a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - A fresh code was issued
    /// * `Err(AuthError::InvalidPhoneFormat)` - Rejected before any lookup
    /// * `Err(AuthError::RateLimited)` - Cooldown or daily quota
    pub async fn request_code(&self, phone: &str) -> DomainResult<IssuedCode> {
        self.request_code_at(phone, Utc::now()).await
    }

    /// Submit a verification code for a phone number
    ///
    /// On success the user's login flag is set and the code is consumed.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code accepted, user logged in
    /// * `Err(AuthError::InvalidPhoneFormat)` - Rejected before any lookup
    /// * `Err(AuthError::InvalidOrExpiredCode)` - Mismatch, expiry, or no
    ///   outstanding code
    pub async fn submit_code(&self, phone: &str, code: &str) -> DomainResult<()> {
        self.submit_code_at(phone, code, Utc::now()).await
    }

    /// Whether a phone number has completed a login
    pub async fn is_logged_in(&self, phone: &str) -> DomainResult<bool> {
        self.validate_phone(phone)?;
        Ok(self.store.get_or_create(phone).await.is_logged_in)
    }

    /// [`Self::request_code`] with an explicit timestamp
    pub async fn request_code_at(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedCode> {
        self.validate_phone(phone)?;

        let engine = &self.engine;
        let result = self
            .store
            .update(phone, |state| match engine.can_send(state, now) {
                SendEligibility::Allowed => {
                    let code = engine.issue_code(state, now);
                    Ok(IssuedCode {
                        code,
                        expires_at: state.code_expires_at.unwrap_or(now),
                        resend_after_secs: engine.config().resend_cooldown_seconds,
                    })
                }
                SendEligibility::Cooldown { retry_after_secs } => Err(AuthError::RateLimited(
                    RateLimitReason::Cooldown { retry_after_secs },
                )
                .into()),
                SendEligibility::DailyQuotaReached { limit } => {
                    Err(AuthError::RateLimited(RateLimitReason::DailyQuota { limit }).into())
                }
            })
            .await;

        match &result {
            Ok(issued) => tracing::info!(
                phone = %mask_phone(phone),
                event = "otp_issued",
                expires_at = %issued.expires_at,
                "Issued verification code"
            ),
            Err(error) => tracing::warn!(
                phone = %mask_phone(phone),
                event = "otp_send_rejected",
                error = %error,
                "Rejected verification code request"
            ),
        }

        result
    }

    /// [`Self::submit_code`] with an explicit timestamp
    pub async fn submit_code_at(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.validate_phone(phone)?;

        let engine = &self.engine;
        let result = self
            .store
            .update(phone, |state| {
                if engine.verify(state, code, now) {
                    Ok(())
                } else {
                    Err(AuthError::InvalidOrExpiredCode.into())
                }
            })
            .await;

        match &result {
            Ok(()) => tracing::info!(
                phone = %mask_phone(phone),
                event = "otp_verified",
                "Verification succeeded, user logged in"
            ),
            Err(error) => tracing::warn!(
                phone = %mask_phone(phone),
                event = "otp_verification_failed",
                error = %error,
                "Verification failed"
            ),
        }

        result
    }

    /// The shared user store
    pub fn store(&self) -> &Arc<UserStore<S>> {
        &self.store
    }

    fn validate_phone(&self, phone: &str) -> DomainResult<()> {
        if is_valid_phone(phone) {
            Ok(())
        } else {
            Err(AuthError::InvalidPhoneFormat {
                phone: mask_phone(phone),
            }
            .into())
        }
    }
}
