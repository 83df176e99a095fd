/// Posts Service Library
///
/// Read side of posts for the Nova social platform: the cursor-paginated
/// feed, single post lookup, and the admin offset listing, over HTTP and a
/// WebSocket push channel.
///
/// # Modules
///
/// - `handlers`: HTTP and WebSocket handlers
/// - `models`: Data structures for posts and pages
/// - `services`: Feed query parsing and pagination
/// - `db`: Storage traits and PostgreSQL stores
/// - `middleware`: Gateway identity and request metrics
/// - `error`: Error bridge to actix-web
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
