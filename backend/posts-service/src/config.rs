/// Configuration management for Posts Service
///
/// This module handles loading and managing configuration from environment variables.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Feed and admin listing page limits
    pub feed: FeedConfig,
    /// WebSocket push channel configuration
    pub websocket: WebSocketConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub admin_default_limit: u32,
    pub admin_max_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketConfig {
    pub heartbeat_interval_secs: u64,
    pub client_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            admin_default_limit: 10,
            admin_max_limit: 100,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_page_size == 0 || self.admin_default_limit == 0 {
            return Err("page size defaults must be at least 1".to_string());
        }
        if self.default_page_size > self.max_page_size {
            return Err(format!(
                "FEED_DEFAULT_PAGE_SIZE ({}) exceeds FEED_MAX_PAGE_SIZE ({})",
                self.default_page_size, self.max_page_size
            ));
        }
        if self.admin_default_limit > self.admin_max_limit {
            return Err(format!(
                "ADMIN_DEFAULT_PAGE_LIMIT ({}) exceeds ADMIN_MAX_PAGE_LIMIT ({})",
                self.admin_default_limit, self.admin_max_limit
            ));
        }
        Ok(())
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: 5,
            client_timeout_secs: 30,
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.heartbeat_interval_secs == 0 {
            return Err("WS_HEARTBEAT_INTERVAL_SECS must be at least 1".to_string());
        }
        if self.client_timeout_secs <= self.heartbeat_interval_secs {
            return Err(
                "WS_CLIENT_TIMEOUT_SECS must be greater than WS_HEARTBEAT_INTERVAL_SECS"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let feed_defaults = FeedConfig::default();
        let ws_defaults = WebSocketConfig::default();

        let config = Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("POSTS_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("POSTS_SERVICE_PORT", 8082)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/nova".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            feed: FeedConfig {
                default_page_size: parse_env_or_default(
                    "FEED_DEFAULT_PAGE_SIZE",
                    feed_defaults.default_page_size,
                )?,
                max_page_size: parse_env_or_default(
                    "FEED_MAX_PAGE_SIZE",
                    feed_defaults.max_page_size,
                )?,
                admin_default_limit: parse_env_or_default(
                    "ADMIN_DEFAULT_PAGE_LIMIT",
                    feed_defaults.admin_default_limit,
                )?,
                admin_max_limit: parse_env_or_default(
                    "ADMIN_MAX_PAGE_LIMIT",
                    feed_defaults.admin_max_limit,
                )?,
            },
            websocket: WebSocketConfig {
                heartbeat_interval_secs: parse_env_or_default(
                    "WS_HEARTBEAT_INTERVAL_SECS",
                    ws_defaults.heartbeat_interval_secs,
                )?,
                client_timeout_secs: parse_env_or_default(
                    "WS_CLIENT_TIMEOUT_SECS",
                    ws_defaults.client_timeout_secs,
                )?,
            },
        };

        config.feed.validate()?;
        config.websocket.validate()?;

        Ok(config)
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
