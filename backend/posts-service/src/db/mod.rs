/// Database access layer
///
/// This module provides:
/// - The storage traits the feed engine consumes (`PostStore`, `ReactionStore`)
/// - Filter and ordering types shared by every store implementation
/// - PostgreSQL implementations and schema bootstrap
///
/// Stores are read-only from this service's perspective.
use crate::models::Post;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

pub mod post_repo;
pub mod reaction_repo;
pub mod schema;

pub use post_repo::PgPostStore;
pub use reaction_repo::PgReactionStore;
pub use schema::ensure_schema;

/// Exclusive upper bound of a backward scan.
///
/// With an id the bound is the composite `(created_at, id) < (t, id)`, which
/// keeps page boundaries stable when several posts share a timestamp.
/// Without one it is `created_at < t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyset {
    pub created_at: DateTime<Utc>,
    pub id: Option<Uuid>,
}

impl Keyset {
    pub fn admits(&self, post: &Post) -> bool {
        match self.id {
            Some(id) => (post.created_at, post.id) < (self.created_at, id),
            None => post.created_at < self.created_at,
        }
    }
}

/// Conjunctive filter; `None` fields are not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub id: Option<Uuid>,
    pub topic_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub before: Option<Keyset>,
    pub created_after: Option<DateTime<Utc>>,
}

impl PostFilter {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn created_after(at: DateTime<Utc>) -> Self {
        Self {
            created_after: Some(at),
            ..Self::default()
        }
    }

    /// Reference semantics for every store implementation.
    pub fn matches(&self, post: &Post) -> bool {
        self.id.map_or(true, |id| post.id == id)
            && self.topic_id.map_or(true, |topic| post.topic_id == Some(topic))
            && self.author_id.map_or(true, |author| post.author_id == author)
            && self.before.map_or(true, |bound| bound.admits(post))
            && self.created_after.map_or(true, |at| post.created_at > at)
    }
}

/// Total orders over posts; ties on `created_at` are broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `created_at DESC, id DESC`
    NewestFirst,
}

impl SortOrder {
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            Self::NewestFirst => (b.created_at, b.id).cmp(&(a.created_at, a.id)),
        }
    }

    pub(crate) fn sql(&self) -> &'static str {
        match self {
            Self::NewestFirst => " ORDER BY created_at DESC, id DESC",
        }
    }
}

/// Read access to the post collection
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<Post>>;

    async fn count(&self, filter: &PostFilter) -> anyhow::Result<u64>;

    async fn find_one(&self, filter: &PostFilter) -> anyhow::Result<Option<Post>>;
}

/// Read access to per-user reactions
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Reaction kind per post for one user, in a single lookup.
    /// Posts the user has not reacted to are absent from the map.
    async fn reactions_for(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, String>>;
}
