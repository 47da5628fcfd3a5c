//! Handler for POST /api/v1/auth/send-code

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use otp_core::errors::AuthError;
use otp_core::repositories::StateStore;
use otp_shared::phone::mask_phone;
use otp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::domain_error_response;

/// Issue a verification code for a phone number
///
/// # Request body
///
/// ```json
/// { "phone": "13800138000" }
/// ```
///
/// # Responses
///
/// - 200: code issued; the body carries the code itself because no real
///   SMS delivery exists in this service
/// - 400: `INVALID_PHONE_FORMAT`
/// - 429: `RATE_LIMIT_EXCEEDED` (cooldown or daily quota), with a
///   `Retry-After` header when the reason is the cooldown
pub async fn send_code<S: StateStore + 'static>(
    state: web::Data<AppState<S>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    let request_id = Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        phone = %mask_phone(&request.phone),
        "Processing send-code request"
    );

    if request.validate().is_err() {
        let error = AuthError::InvalidPhoneFormat {
            phone: mask_phone(&request.phone),
        }
        .into();
        return domain_error_response(&error, &request_id);
    }

    match state.auth_service.request_code(&request.phone).await {
        Ok(issued) => HttpResponse::Ok().json(
            ApiResponse::success(SendCodeResponse {
                code: issued.code,
                expires_at: issued.expires_at,
                resend_after: issued.resend_after_secs,
            })
            .with_request_id(request_id),
        ),
        Err(error) => domain_error_response(&error, &request_id),
    }
}
