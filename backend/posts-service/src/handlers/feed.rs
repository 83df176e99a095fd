use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::error::Result;
use crate::middleware::UserId;
use crate::models::FeedPage;
use crate::services::{FeedQuery, RawFeedParams};
use crate::state::AppState;

/// One page of the feed, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/posts/page",
    tag = "feed",
    params(RawFeedParams),
    responses(
        (status = 200, description = "Feed page", body = FeedPage),
        (status = 400, description = "Malformed query parameter"),
        (status = 401, description = "Missing caller identity"),
        (status = 500, description = "Internal server error")
    ),
    security(("gateway_identity" = []))
)]
pub async fn get_feed_page(
    query: web::Query<RawFeedParams>,
    user_id: UserId,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let feed_query = FeedQuery::parse(&query, user_id.0, &state.page_limits)?;

    debug!(
        user_id = %user_id.0,
        page_size = feed_query.page_size,
        cursor = ?feed_query.last_post_time,
        "Feed page request"
    );

    let page = state.feed.fetch_page(&feed_query).await?;
    Ok(HttpResponse::Ok().json(page))
}
