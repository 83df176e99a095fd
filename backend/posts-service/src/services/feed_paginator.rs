//! Cursor-paginated feed
//!
//! Produces one [`FeedPage`] per call by scanning backward from an exclusive
//! keyset bound. One extra row (the probe) is requested to learn whether an
//! older page exists, so no count query is needed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use error_types::ServiceResult;
use tracing::debug;

use super::feed_query::FeedQuery;
use super::storage_error;
use crate::db::{PostFilter, PostStore, ReactionStore, SortOrder};
use crate::metrics::feed::{
    FEED_HAS_NEW_CHECKS, FEED_PAGE_DURATION_SECONDS, FEED_PAGE_SIZE, FEED_PAGE_TOTAL,
};
use crate::models::{FeedPage, PostWithEngagement};

#[derive(Clone)]
pub struct FeedPaginator {
    posts: Arc<dyn PostStore>,
    reactions: Arc<dyn ReactionStore>,
}

impl FeedPaginator {
    pub fn new(posts: Arc<dyn PostStore>, reactions: Arc<dyn ReactionStore>) -> Self {
        Self { posts, reactions }
    }

    pub async fn fetch_page(&self, query: &FeedQuery) -> ServiceResult<FeedPage> {
        let start = Instant::now();
        let result = self.build_page(query).await;

        let outcome = match &result {
            Ok(page) if page.is_terminal() => "terminal",
            Ok(_) => "page",
            Err(_) => "error",
        };
        FEED_PAGE_DURATION_SECONDS
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());
        FEED_PAGE_TOTAL.with_label_values(&[outcome]).inc();

        result
    }

    async fn build_page(&self, query: &FeedQuery) -> ServiceResult<FeedPage> {
        let page_size = query.page_size as usize;
        FEED_PAGE_SIZE.observe(page_size as f64);

        let filter = query.page_filter();
        let probe_limit = u64::from(query.page_size) + 1;

        let (mut posts, has_new) = tokio::try_join!(
            self.posts.find(&filter, SortOrder::NewestFirst, 0, probe_limit),
            self.has_new_since(query.last_fetch_time),
        )
        .map_err(storage_error)?;

        let has_more = posts.len() > page_size;
        posts.truncate(page_size);

        let (next_cursor, next_cursor_id) = match posts.last() {
            Some(oldest) if has_more => (Some(oldest.created_at), Some(oldest.id)),
            _ => (None, None),
        };

        let mut reactions = if posts.is_empty() {
            HashMap::new()
        } else {
            let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
            self.reactions
                .reactions_for(query.user_id, &ids)
                .await
                .map_err(storage_error)?
        };

        debug!(
            user_id = %query.user_id,
            returned = posts.len(),
            has_more,
            has_new,
            "Feed page assembled"
        );

        let items = posts
            .into_iter()
            .map(|post| {
                let reaction = reactions.remove(&post.id);
                PostWithEngagement::new(post, reaction)
            })
            .collect();

        Ok(FeedPage {
            items,
            next_cursor,
            next_cursor_id,
            has_new,
        })
    }

    /// Existence check over the whole collection; topic and author do not apply.
    async fn has_new_since(&self, last_fetch_time: Option<DateTime<Utc>>) -> anyhow::Result<bool> {
        let Some(since) = last_fetch_time else {
            return Ok(false);
        };

        let found = self
            .posts
            .find_one(&PostFilter::created_after(since))
            .await?
            .is_some();

        FEED_HAS_NEW_CHECKS
            .with_label_values(&[if found { "new" } else { "none" }])
            .inc();

        Ok(found)
    }
}
