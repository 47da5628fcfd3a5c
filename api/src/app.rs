//! Application state and route wiring

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, HttpResponse};

use otp_core::repositories::StateStore;
use otp_core::services::auth::AuthService;

use crate::routes;

/// Shared application state handed to every handler
pub struct AppState<S: StateStore> {
    pub auth_service: Arc<AuthService<S>>,
}

/// Register all routes on the actix service config
///
/// Generic over the state store so tests can wire an in-memory backend
/// under the exact same routing table the binary uses.
pub fn configure<S: StateStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/api/v1/auth")
                .route("/send-code", web::post().to(routes::auth::send_code::<S>))
                .route("/verify-code", web::post().to(routes::auth::verify_code::<S>)),
        );
}

/// Permissive CORS, matching the open cross-origin policy of the console
/// era of this service
pub fn create_cors() -> Cors {
    Cors::permissive()
}

/// Liveness probe
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otp-login-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
