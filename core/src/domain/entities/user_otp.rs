//! Per-user OTP state entity for phone-based authentication.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// OTP lifecycle state for a single phone number
///
/// One record exists per phone number. It is created lazily on first
/// lookup with all counters zero, mutated only by code issuance and
/// verification, and never deleted. The record round-trips through the
/// durable store, so every field is serializable.
///
/// Invariants maintained by the engine:
/// - at most one outstanding code; a new issuance discards the old one
/// - `today_send_count` resets exactly when the calendar day changes
///   relative to `last_send_day`
/// - an expired code is never accepted, even on an exact match
/// - a successfully verified code is cleared immediately (single use)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOtpState {
    /// Phone number, primary key (11-digit local mobile format)
    pub phone: String,

    /// Outstanding verification code, `None` when none issued or already
    /// consumed
    #[serde(default)]
    pub active_code: Option<String>,

    /// Absolute expiry of `active_code`
    #[serde(default)]
    pub code_expires_at: Option<DateTime<Utc>>,

    /// Timestamp of the most recent issuance, drives the cooldown
    #[serde(default)]
    pub last_send_at: Option<DateTime<Utc>>,

    /// UTC calendar day of the most recent issuance, drives the daily
    /// quota reset
    #[serde(default)]
    pub last_send_day: Option<NaiveDate>,

    /// Codes issued on `last_send_day`
    #[serde(default)]
    pub today_send_count: u32,

    /// Set on successful verification, cleared by the next issuance
    #[serde(default)]
    pub is_logged_in: bool,
}

impl UserOtpState {
    /// Creates a zero-valued state for a phone number
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            active_code: None,
            code_expires_at: None,
            last_send_at: None,
            last_send_day: None,
            today_send_count: 0,
            is_logged_in: false,
        }
    }

    /// Whether an unexpired code is outstanding at `now`
    pub fn has_active_code(&self, now: DateTime<Utc>) -> bool {
        match (&self.active_code, self.code_expires_at) {
            (Some(_), Some(expires_at)) => now <= expires_at,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_state_is_zero_valued() {
        let state = UserOtpState::new("13800138000");
        assert_eq!(state.phone, "13800138000");
        assert!(state.active_code.is_none());
        assert!(state.code_expires_at.is_none());
        assert!(state.last_send_at.is_none());
        assert!(state.last_send_day.is_none());
        assert_eq!(state.today_send_count, 0);
        assert!(!state.is_logged_in);
    }

    #[test]
    fn test_has_active_code() {
        let now = Utc::now();
        let mut state = UserOtpState::new("13800138000");
        assert!(!state.has_active_code(now));

        state.active_code = Some("A1B2C3".to_string());
        state.code_expires_at = Some(now + Duration::minutes(5));
        assert!(state.has_active_code(now));
        assert!(!state.has_active_code(now + Duration::minutes(6)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let now = Utc::now();
        let state = UserOtpState {
            phone: "13800138000".to_string(),
            active_code: Some("XY12Z9".to_string()),
            code_expires_at: Some(now + Duration::minutes(5)),
            last_send_at: Some(now),
            last_send_day: Some(now.date_naive()),
            today_send_count: 3,
            is_logged_in: false,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: UserOtpState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_deserializes_minimal_record() {
        // Records written before a field existed must still load
        let state: UserOtpState =
            serde_json::from_str(r#"{"phone": "13800138000"}"#).unwrap();
        assert_eq!(state, UserOtpState::new("13800138000"));
    }
}
