use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::models::PostWithEngagement;
use crate::state::AppState;

/// Get a single post with the caller's reaction
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostWithEngagement),
        (status = 400, description = "Malformed post id"),
        (status = 404, description = "Post not found")
    ),
    security(("gateway_identity" = []))
)]
pub async fn get_post(
    path: web::Path<String>,
    user_id: UserId,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let post_id = Uuid::parse_str(path.trim())
        .map_err(|_| ServiceError::invalid_input("id must be a valid UUID"))?;

    let post = state.posts.get_post(user_id.0, post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}
