/// HTTP handlers for post read endpoints
///
/// This module contains handlers for:
/// - Feed: cursor-paginated feed page
/// - Admin: offset-paginated listing for operators
/// - Posts: single post lookup
/// - WebSocket: push channel serving feed pages as events
pub mod admin;
pub mod feed;
pub mod posts;
pub mod ws;

use actix_web::web;
use error_types::ServiceError;

use crate::error::AppError;
use crate::middleware::IdentityMiddleware;

// Re-export handler functions at module level
pub use admin::list_posts_admin;
pub use feed::get_feed_page;
pub use posts::get_post;
pub use ws::feed_socket;

/// Register every identity-scoped route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::from(ServiceError::InvalidInput {
            message: "Malformed query string".to_string(),
            source: Some(Box::new(err)),
        })
        .into()
    }))
    .service(
        web::scope("/api")
            .wrap(IdentityMiddleware)
            .route("/v2/posts/page", web::get().to(get_feed_page))
            .route("/v1/posts/admin", web::get().to(list_posts_admin))
            .route("/v1/posts/{id}", web::get().to(get_post)),
    )
    .service(
        web::resource("/ws/posts")
            .wrap(IdentityMiddleware)
            .route(web::get().to(feed_socket)),
    );
}
