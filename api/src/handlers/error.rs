//! Mapping from domain errors to HTTP responses

use actix_web::HttpResponse;

use otp_core::errors::{AuthError, DomainError, RateLimitReason};
use otp_shared::types::ApiResponse;

/// Build the HTTP response for a domain error
///
/// Status codes:
/// - `INVALID_PHONE_FORMAT` → 400
/// - `RATE_LIMIT_EXCEEDED` → 429, with a `Retry-After` header when the
///   reason is the cooldown
/// - `INVALID_OR_EXPIRED_CODE` → 401
/// - `STORAGE_FAILURE` → 500
pub fn domain_error_response(error: &DomainError, request_id: &str) -> HttpResponse {
    let body = ApiResponse::<()>::error(error.error_code(), error.to_string())
        .with_request_id(request_id);

    match error {
        DomainError::Auth(AuthError::InvalidPhoneFormat { .. }) => {
            HttpResponse::BadRequest().json(body)
        }
        DomainError::Auth(AuthError::RateLimited(reason)) => {
            let mut response = HttpResponse::TooManyRequests();
            if let RateLimitReason::Cooldown { retry_after_secs } = reason {
                response.insert_header(("Retry-After", retry_after_secs.to_string()));
            }
            response.json(body)
        }
        DomainError::Auth(AuthError::InvalidOrExpiredCode) => {
            HttpResponse::Unauthorized().json(body)
        }
        DomainError::Storage(_) => HttpResponse::InternalServerError().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid: DomainError = AuthError::InvalidPhoneFormat {
            phone: "***1234".to_string(),
        }
        .into();
        assert_eq!(domain_error_response(&invalid, "rid").status(), 400);

        let cooldown: DomainError = AuthError::RateLimited(RateLimitReason::Cooldown {
            retry_after_secs: 42,
        })
        .into();
        let response = domain_error_response(&cooldown, "rid");
        assert_eq!(response.status(), 429);
        assert_eq!(
            response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok()),
            Some("42")
        );

        let quota: DomainError =
            AuthError::RateLimited(RateLimitReason::DailyQuota { limit: 5 }).into();
        let response = domain_error_response(&quota, "rid");
        assert_eq!(response.status(), 429);
        assert!(response.headers().get("Retry-After").is_none());

        let bad_code: DomainError = AuthError::InvalidOrExpiredCode.into();
        assert_eq!(domain_error_response(&bad_code, "rid").status(), 401);
    }
}
