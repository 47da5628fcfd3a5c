//! Handler for POST /api/v1/auth/verify-code

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use otp_core::errors::AuthError;
use otp_core::repositories::StateStore;
use otp_shared::phone::mask_phone;
use otp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::domain_error_response;

/// Redeem a verification code and establish the login flag
///
/// # Request body
///
/// ```json
/// { "phone": "13800138000", "code": "A1B2C3" }
/// ```
///
/// # Responses
///
/// - 200: code accepted, user logged in
/// - 400: `INVALID_PHONE_FORMAT`
/// - 401: `INVALID_OR_EXPIRED_CODE` (mismatch, expiry, already used, or
///   never issued)
pub async fn verify_code<S: StateStore + 'static>(
    state: web::Data<AppState<S>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    let request_id = Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        phone = %mask_phone(&request.phone),
        "Processing verify-code request"
    );

    // A malformed code can never match; short-circuit as the same error
    // the engine would produce, without touching the store
    if request.validate().is_err() {
        let error = if otp_shared::phone::is_valid_phone(&request.phone) {
            AuthError::InvalidOrExpiredCode.into()
        } else {
            AuthError::InvalidPhoneFormat {
                phone: mask_phone(&request.phone),
            }
            .into()
        };
        return domain_error_response(&error, &request_id);
    }

    match state
        .auth_service
        .submit_code(&request.phone, &request.code)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::success(VerifyCodeResponse {
                message: "Login successful".to_string(),
            })
            .with_request_id(request_id),
        ),
        Err(error) => domain_error_response(&error, &request_id),
    }
}
