//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the OTP lifecycle rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minimum seconds between two code issuances for one phone number
    #[serde(default = "default_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Maximum codes issuable per phone number per calendar day
    #[serde(default = "default_daily_send_limit")]
    pub daily_send_limit: u32,

    /// Minutes until an issued code expires
    #[serde(default = "default_expiration_minutes")]
    pub code_expiration_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: default_cooldown_seconds(),
            daily_send_limit: default_daily_send_limit(),
            code_expiration_minutes: default_expiration_minutes(),
        }
    }
}

impl OtpConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    ///
    /// Recognized variables: `OTP_COOLDOWN_SECONDS`, `OTP_DAILY_SEND_LIMIT`,
    /// `OTP_CODE_EXPIRATION_MINUTES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            resend_cooldown_seconds: env_parse(
                "OTP_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            daily_send_limit: env_parse("OTP_DAILY_SEND_LIMIT", defaults.daily_send_limit),
            code_expiration_minutes: env_parse(
                "OTP_CODE_EXPIRATION_MINUTES",
                defaults.code_expiration_minutes,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_cooldown_seconds() -> i64 {
    60
}

fn default_daily_send_limit() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    5
}
