//! Environment-backed configuration for the API server.

use std::env;

/// Runtime configuration resolved from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Symmetric secret for signing access tokens
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Loads configuration from the environment, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .unwrap_or(8080);
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());

        Self {
            host,
            port,
            jwt_secret,
        }
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
