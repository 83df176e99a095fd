/// OpenAPI documentation for Nova Posts Service
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{FeedPage, Post, PostWithEngagement};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nova Posts Service API",
        version = "1.0.0",
        description = "Read side of posts: cursor-paginated feed with new-post detection, single post lookup, and an offset-paginated admin listing. Failures use a fixed {kind, message} body on both HTTP and the /ws/posts push channel.",
        contact(
            name = "Nova Team",
            email = "support@nova.app"
        ),
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8082", description = "Development server"),
    ),
    paths(
        handlers::feed::get_feed_page,
        handlers::posts::get_post,
        handlers::admin::list_posts_admin,
    ),
    components(schemas(Post, PostWithEngagement, FeedPage)),
    tags(
        (name = "feed", description = "Cursor-paginated feed"),
        (name = "posts", description = "Single post retrieval"),
        (name = "admin", description = "Operator listings"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "gateway_identity",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    crate::middleware::USER_ID_HEADER,
                    "Caller id forwarded by the API gateway",
                ))),
            )
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
