//! In-memory stores for integration tests
//!
//! `InMemoryPostStore` applies filters and ordering exactly as the Postgres
//! store does, using the shared `PostFilter::matches` / `SortOrder::compare`.
//! `CountingReactionStore` records every lookup for N+1 verification.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use posts_service::config::{FeedConfig, WebSocketConfig};
use posts_service::db::{PostFilter, PostStore, ReactionStore, SortOrder};
use posts_service::models::Post;
use posts_service::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const VIEWER: Uuid = Uuid::from_u128(0xFEED);
pub const AUTHOR_A: Uuid = Uuid::from_u128(0xA);
pub const AUTHOR_B: Uuid = Uuid::from_u128(0xB);
pub const TOPIC_X: Uuid = Uuid::from_u128(0x10);
pub const TOPIC_Y: Uuid = Uuid::from_u128(0x20);

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn post(id: u128, secs: i64) -> Post {
    Post {
        id: Uuid::from_u128(id),
        author_id: AUTHOR_A,
        topic_id: Some(TOPIC_X),
        content: format!("post {}", id),
        reaction_count: 0,
        created_at: at(secs),
        updated_at: at(secs),
    }
}

pub fn post_by(id: u128, secs: i64, author: Uuid, topic: Option<Uuid>) -> Post {
    Post {
        author_id: author,
        topic_id: topic,
        ..post(id, secs)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<Mutex<Vec<Post>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryPostStore {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn insert(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    /// Make every subsequent call fail with an opaque storage error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer (10.1.2.3:5432)");
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<Post>> {
        self.check()?;
        let mut matched: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| order.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> anyhow::Result<u64> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.matches(p))
            .count() as u64)
    }

    async fn find_one(&self, filter: &PostFilter) -> anyhow::Result<Option<Post>> {
        Ok(self
            .find(filter, SortOrder::NewestFirst, 0, 1)
            .await?
            .into_iter()
            .next())
    }
}

/// Reaction store that records every lookup
#[derive(Clone, Default)]
pub struct CountingReactionStore {
    reactions: Arc<Mutex<HashMap<(Uuid, Uuid), String>>>,
    calls: Arc<Mutex<Vec<Vec<Uuid>>>>,
}

impl CountingReactionStore {
    pub fn react(&self, user_id: Uuid, post_id: Uuid, kind: &str) {
        self.reactions
            .lock()
            .unwrap()
            .insert((user_id, post_id), kind.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<Uuid>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReactionStore for CountingReactionStore {
    async fn reactions_for(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, String>> {
        self.calls.lock().unwrap().push(post_ids.to_vec());

        let reactions = self.reactions.lock().unwrap();
        Ok(post_ids
            .iter()
            .filter_map(|id| reactions.get(&(user_id, *id)).map(|kind| (*id, kind.clone())))
            .collect())
    }
}

pub fn app_state(posts: &InMemoryPostStore, reactions: &CountingReactionStore) -> AppState {
    AppState::new(
        Arc::new(posts.clone()),
        Arc::new(reactions.clone()),
        &FeedConfig::default(),
        WebSocketConfig::default(),
    )
}
