use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::Utc;
use posts_service::db::{ensure_schema, PgPostStore, PgReactionStore};
use posts_service::openapi::ApiDoc;
use posts_service::{handlers, logging, middleware, AppState};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    message: String,
    latency_ms: u64,
    timestamp: String,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "posts-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let start = Instant::now();
    let result = state.check_postgres().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (ready, status, message) = match result {
        Ok(_) => (
            true,
            ComponentStatus::Healthy,
            "PostgreSQL connection successful".to_string(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                false,
                ComponentStatus::Unhealthy,
                "PostgreSQL connection failed".to_string(),
            )
        }
    };

    let response = ReadinessResponse {
        ready,
        status,
        message,
        latency_ms,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Posts Service
///
/// Read side of posts: the cursor-paginated feed, single post lookup, and the
/// admin offset listing.
///
/// # Routes
///
/// - `/api/v2/posts/page` - Cursor-paginated feed
/// - `/api/v1/posts/admin` - Offset-paginated admin listing
/// - `/api/v1/posts/{id}` - Single post
/// - `/ws/posts` - WebSocket push channel
///
/// Runs on port 8082 (configurable via POSTS_SERVICE_PORT env var).
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let config = match posts_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting posts-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database.url)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("Failed to create database pool: {e}"),
            )
        })?;

    tracing::info!("Connected to database");

    ensure_schema(&db_pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to ensure posts schema: {e}"),
        )
    })?;

    let state = web::Data::new(AppState::new(
        Arc::new(PgPostStore::new(db_pool.clone())),
        Arc::new(PgReactionStore::new(db_pool.clone())),
        &config.feed,
        config.websocket.clone(),
    ));
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .app_data(state.clone())
            .app_data(health_state.clone())
            .wrap(middleware::MetricsMiddleware)
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(posts_service::metrics::serve_metrics))
            .route("/health", web::get().to(health_summary))
            .route("/health/ready", web::get().to(readiness_summary))
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)?
    .workers(4)
    .shutdown_timeout(30)
    .run()
    .await
}
