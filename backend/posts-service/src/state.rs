use std::sync::Arc;

use crate::config::{FeedConfig, WebSocketConfig};
use crate::db::{PostStore, ReactionStore};
use crate::services::{AdminLimits, FeedPaginator, OffsetPager, PageLimits, PostService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedPaginator,
    pub admin: OffsetPager,
    pub posts: PostService,
    pub page_limits: PageLimits,
    pub websocket: WebSocketConfig,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostStore>,
        reactions: Arc<dyn ReactionStore>,
        feed: &FeedConfig,
        websocket: WebSocketConfig,
    ) -> Self {
        Self {
            feed: FeedPaginator::new(posts.clone(), reactions.clone()),
            admin: OffsetPager::new(posts.clone(), AdminLimits::from(feed)),
            posts: PostService::new(posts, reactions),
            page_limits: PageLimits::from(feed),
            websocket,
        }
    }
}
