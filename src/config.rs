//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Local store configuration
    pub store: StoreConfig,
    /// Chat backend configuration
    pub chat: ChatConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Local store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the SQLite participant database
    pub database_path: String,
    /// Optional roster file seeded into the database at startup
    pub roster_path: Option<String>,
}

/// Chat backend configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the chat backend
    pub api_url: String,
    /// Request timeout for the chat backend (in seconds)
    pub timeout_secs: u64,
}

impl ChatConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            store: StoreConfig {
                database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| {
                    // Default to ~/.live-room-gateway or current directory
                    match env::var_os("HOME") {
                        Some(home) => format!(
                            "{}/.live-room-gateway/participants.db",
                            home.to_string_lossy()
                        ),
                        None => ".live-room-gateway/participants.db".to_string(),
                    }
                }),
                roster_path: env::var("ROSTER_PATH").ok().filter(|p| !p.is_empty()),
            },
            chat: ChatConfig {
                api_url: env::var("CHAT_API_URL")
                    .unwrap_or_else(|_| "http://localhost:3030".to_string()),
                timeout_secs: env::var("CHAT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(10),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
