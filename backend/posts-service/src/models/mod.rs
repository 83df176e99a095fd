/// Data models for posts-service
///
/// This module defines structures for:
/// - Post: a stored post, read-only from this service's point of view
/// - PostWithEngagement: a post plus fields derived for the calling user
/// - FeedPage: one page of the cursor-paginated feed
/// - OffsetPage: one page of the admin offset listing
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub content: String,
    /// Total reactions across all users
    pub reaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post enriched with request-scoped engagement for the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostWithEngagement {
    #[serde(flatten)]
    pub post: Post,
    pub is_reacted: bool,
    /// Reaction kind the caller left, if any
    pub my_reaction: Option<String>,
}

impl PostWithEngagement {
    pub fn new(post: Post, my_reaction: Option<String>) -> Self {
        Self {
            post,
            is_reacted: my_reaction.is_some(),
            my_reaction,
        }
    }
}

/// One page of the feed.
///
/// `next_cursor` and `next_cursor_id` are both set or both absent; absent
/// means no older matching posts exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<PostWithEngagement>,
    pub next_cursor: Option<DateTime<Utc>>,
    pub next_cursor_id: Option<Uuid>,
    /// Whether any post was created after the caller's `lastFetchTime`
    pub has_new: bool,
}

impl FeedPage {
    pub fn is_terminal(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// One page of an offset listing.
///
/// The item list is serialized as `users` to keep the legacy admin wire
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
    #[serde(rename = "users")]
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_page: u64,
}
