use actix_web::{web, HttpResponse};
use error_types::validation::rules::validate_positive_int;
use error_types::ServiceError;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::db::PostFilter;
use crate::error::Result;
use crate::middleware::UserRole;
use crate::models::{OffsetPage, Post};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListParams {
    /// 1-based page number
    pub page: Option<String>,
    pub limit: Option<String>,
    pub topic: Option<String>,
    pub author: Option<String>,
}

fn optional_uuid(
    field: &str,
    value: &Option<String>,
) -> std::result::Result<Option<Uuid>, ServiceError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Uuid::parse_str(v)
            .map(Some)
            .map_err(|_| ServiceError::invalid_input(format!("{} must be a valid UUID", field))),
    }
}

/// Offset-paginated post listing for operators
#[utoipa::path(
    get,
    path = "/api/v1/posts/admin",
    tag = "admin",
    params(AdminListParams),
    responses(
        (status = 200, description = "Numbered page; items are under `users`", body = OffsetPage<Post>),
        (status = 400, description = "Malformed page or limit"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("gateway_identity" = []))
)]
pub async fn list_posts_admin(
    query: web::Query<AdminListParams>,
    role: UserRole,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    role.require_admin("list", "posts")?;

    let limits = state.admin.limits();
    let page = match query.page.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(value) => validate_positive_int("page", value)?,
        None => 1,
    };
    let limit = match query.limit.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(value) => validate_positive_int("limit", value)?,
        None => u64::from(limits.default_limit),
    };

    let filter = PostFilter {
        topic_id: optional_uuid("topic", &query.topic)?,
        author_id: optional_uuid("author", &query.author)?,
        ..PostFilter::default()
    };

    let page = u32::try_from(page)
        .map_err(|_| ServiceError::invalid_input("page is out of range"))?;
    let limit = u32::try_from(limit).unwrap_or(u32::MAX);

    let listing = state.admin.list(page, limit, &filter).await?;
    Ok(HttpResponse::Ok().json(listing))
}
