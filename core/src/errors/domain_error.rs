//! Domain-specific error types for the OTP login flow
//!
//! Error messages carry bilingual text (English and Chinese) in the
//! `english | chinese` form used across the codebase.

use std::path::PathBuf;
use thiserror::Error;

/// Why a send request was rate limited
///
/// Both reasons surface to the caller as one `RateLimited` error, but stay
/// distinguishable internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitReason {
    /// The cooldown window since the last send has not elapsed
    Cooldown {
        /// Seconds until a send is allowed again
        retry_after_secs: i64,
    },
    /// The per-day issuance quota is exhausted
    DailyQuota {
        /// The configured daily limit
        limit: u32,
    },
}

/// Authentication-related errors with bilingual messages
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid phone format: {phone} | 无效的手机号码格式: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Too many requests. Please try again later | 请求过于频繁，请稍后重试")]
    RateLimited(RateLimitReason),

    #[error("Invalid or expired verification code | 无效验证码或已过期")]
    InvalidOrExpiredCode,
}

/// Durable-store errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read store file {path} | 读取存储文件失败 {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file {path} is corrupt, quarantined as {quarantined} | 存储文件已损坏，已隔离 {quarantined}")]
    Corrupt {
        path: PathBuf,
        quarantined: PathBuf,
    },

    #[error("Failed to write store file {path} | 写入存储文件失败 {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Unified error type for the domain layer
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable machine-readable code for API payloads
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Auth(AuthError::InvalidPhoneFormat { .. }) => "INVALID_PHONE_FORMAT",
            DomainError::Auth(AuthError::RateLimited(_)) => "RATE_LIMIT_EXCEEDED",
            DomainError::Auth(AuthError::InvalidOrExpiredCode) => "INVALID_OR_EXPIRED_CODE",
            DomainError::Storage(_) => "STORAGE_FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilingual_messages() {
        let error = AuthError::InvalidPhoneFormat {
            phone: "123".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Invalid phone format"));
        assert!(message.contains("无效的手机号码格式"));
    }

    #[test]
    fn test_rate_limit_reasons_distinguishable() {
        let cooldown = AuthError::RateLimited(RateLimitReason::Cooldown {
            retry_after_secs: 30,
        });
        let quota = AuthError::RateLimited(RateLimitReason::DailyQuota { limit: 5 });

        match cooldown {
            AuthError::RateLimited(RateLimitReason::Cooldown { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 30)
            }
            _ => panic!("expected cooldown"),
        }
        match quota {
            AuthError::RateLimited(RateLimitReason::DailyQuota { limit }) => {
                assert_eq!(limit, 5)
            }
            _ => panic!("expected quota"),
        }
    }

    #[test]
    fn test_error_codes() {
        let err: DomainError = AuthError::InvalidOrExpiredCode.into();
        assert_eq!(err.error_code(), "INVALID_OR_EXPIRED_CODE");

        let err: DomainError = AuthError::RateLimited(RateLimitReason::DailyQuota {
            limit: 5,
        })
        .into();
        assert_eq!(err.error_code(), "RATE_LIMIT_EXCEEDED");
    }
}
