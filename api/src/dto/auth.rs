//! Authentication endpoint DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for POST /api/v1/auth/send-code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Phone number in 11-digit local mobile format
    #[validate(length(min = 11, max = 11, message = "phone must be 11 digits"))]
    pub phone: String,
}

/// Response body for a successful send-code request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// The issued code, echoed because no real SMS delivery exists
    pub code: String,

    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Seconds until the next send is allowed
    pub resend_after: i64,
}

/// Request body for POST /api/v1/auth/verify-code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Phone number in 11-digit local mobile format
    #[validate(length(min = 11, max = 11, message = "phone must be 11 digits"))]
    pub phone: String,

    /// The 6-character verification code
    #[validate(length(min = 6, max = 6, message = "code must be 6 characters"))]
    pub code: String,
}

/// Response body for a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    /// Human-readable confirmation
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_validation() {
        let ok = SendCodeRequest {
            phone: "13800138000".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = SendCodeRequest {
            phone: "138".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_verify_code_request_validation() {
        let ok = VerifyCodeRequest {
            phone: "13800138000".to_string(),
            code: "A1B2C3".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_code = VerifyCodeRequest {
            phone: "13800138000".to_string(),
            code: "A1B2".to_string(),
        };
        assert!(bad_code.validate().is_err());
    }
}
