//! HTTP server and storage location configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// HTTP server and durable store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the durable JSON record file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `SERVER_HOST`, `SERVER_PORT`, and
    /// `OTP_DATA_FILE` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            data_file: env::var("OTP_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
        }
    }

    /// The `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}
