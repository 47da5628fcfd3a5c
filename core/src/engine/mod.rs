//! Pure OTP state-transition logic
//!
//! The engine operates on one user's [`UserOtpState`] and takes an explicit
//! `now`, so every rule is deterministic under test. It performs no I/O and
//! holds no state of its own beyond configuration; atomicity of the
//! check-and-act sequence is the caller's responsibility (the user store
//! holds the per-user critical section across `can_send` + `issue_code`).

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;

use otp_shared::config::OtpConfig;

use crate::domain::entities::UserOtpState;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Fixed alphabet codes are drawn from: digits and uppercase letters.
/// Each of the six positions is drawn independently and uniformly.
pub const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Outcome of a send-eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendEligibility {
    /// A code may be issued now
    Allowed,
    /// Still inside the cooldown window since the last send
    Cooldown {
        /// Seconds until the cooldown elapses
        retry_after_secs: i64,
    },
    /// The daily issuance quota for the current day is exhausted
    DailyQuotaReached {
        /// The configured daily limit
        limit: u32,
    },
}

/// OTP lifecycle engine
///
/// Day boundaries for the quota are UTC calendar days, tracked per user
/// via the stored day marker; no global "current day" exists.
#[derive(Debug, Clone)]
pub struct OtpEngine {
    config: OtpConfig,
}

impl OtpEngine {
    /// Create an engine with the given lifecycle configuration
    pub fn new(config: OtpConfig) -> Self {
        Self { config }
    }

    /// The configured lifecycle parameters
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Check whether a code may be issued for this user at `now`
    ///
    /// Rejects when the cooldown since `last_send_at` has not elapsed, or
    /// when `now` falls on the stored send day and the daily quota is
    /// already spent. A quota spent on a previous day never blocks a send.
    pub fn can_send(&self, state: &UserOtpState, now: DateTime<Utc>) -> SendEligibility {
        if let Some(last_send_at) = state.last_send_at {
            let elapsed = now.signed_duration_since(last_send_at);
            let cooldown = Duration::seconds(self.config.resend_cooldown_seconds);
            if elapsed < cooldown {
                return SendEligibility::Cooldown {
                    retry_after_secs: (cooldown - elapsed).num_seconds().max(1),
                };
            }
        }

        if state.last_send_day == Some(now.date_naive())
            && state.today_send_count >= self.config.daily_send_limit
        {
            return SendEligibility::DailyQuotaReached {
                limit: self.config.daily_send_limit,
            };
        }

        SendEligibility::Allowed
    }

    /// Issue a fresh code for this user at `now`
    ///
    /// Overwrites any outstanding code, starts a new expiry window, records
    /// the send for cooldown and quota tracking (resetting the counter when
    /// the UTC day changed), and clears the login flag. Eligibility is not
    /// re-checked here; callers must have confirmed [`Self::can_send`]
    /// inside the same critical section.
    pub fn issue_code(&self, state: &mut UserOtpState, now: DateTime<Utc>) -> String {
        let code = Self::generate_code();

        state.active_code = Some(code.clone());
        state.code_expires_at =
            Some(now + Duration::minutes(self.config.code_expiration_minutes));

        if state.last_send_day != Some(now.date_naive()) {
            state.today_send_count = 0;
        }
        state.last_send_day = Some(now.date_naive());
        state.last_send_at = Some(now);
        state.today_send_count += 1;

        // A fresh code invalidates any prior login tied to the old one
        state.is_logged_in = false;

        code
    }

    /// Verify a submitted code against this user's state at `now`
    ///
    /// Fails when no code is outstanding, the code has expired, or the
    /// submitted code does not match exactly (case-sensitive, compared in
    /// constant time). On success the login flag is set and the code is
    /// consumed so it can never be redeemed twice.
    pub fn verify(&self, state: &mut UserOtpState, submitted: &str, now: DateTime<Utc>) -> bool {
        let Some(active_code) = state.active_code.as_deref() else {
            return false;
        };
        let Some(expires_at) = state.code_expires_at else {
            return false;
        };
        if now > expires_at {
            return false;
        }
        if submitted.len() != active_code.len()
            || !constant_time_eq(submitted.as_bytes(), active_code.as_bytes())
        {
            return false;
        }

        state.is_logged_in = true;
        state.active_code = None;
        state.code_expires_at = None;
        true
    }

    /// Generate a random 6-character code over [`CODE_ALPHABET`]
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}
