//! Binary entry point: HTTP server by default, console mode with
//! `--console`

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use otp_api::app::{self, AppState};
use otp_api::console;
use otp_core::services::auth::AuthService;
use otp_core::store::UserStore;
use otp_infra::JsonFileStore;
use otp_shared::config::{OtpConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let otp_config = OtpConfig::from_env();

    let store = Arc::new(UserStore::new(JsonFileStore::new(&server_config.data_file)));
    match store.load().await {
        Ok(records) => tracing::info!(
            records,
            data_file = %server_config.data_file.display(),
            "Loaded user states"
        ),
        // Unreadable store: report and continue with the empty in-memory map
        Err(error) => tracing::error!(
            error = %error,
            "Failed to read durable store; starting empty"
        ),
    }

    let auth_service = Arc::new(AuthService::new(store.clone(), otp_config));

    if std::env::args().any(|arg| arg == "--console") {
        console::run(auth_service).await?;
    } else {
        let bind_address = server_config.bind_address();
        tracing::info!(%bind_address, "Starting OTP login API server");

        let app_service = auth_service.clone();
        HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .wrap(app::create_cors())
                .app_data(web::Data::new(AppState {
                    auth_service: app_service.clone(),
                }))
                .configure(app::configure::<JsonFileStore>)
        })
        .bind(&bind_address)?
        .run()
        .await?;
    }

    // Final snapshot so the durable record reflects the last state
    if let Err(error) = store.persist().await {
        tracing::error!(error = %error, "Failed to write final snapshot");
    }

    Ok(())
}
