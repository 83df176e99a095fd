/// Post service - single post retrieval with the caller's engagement
use crate::db::{PostFilter, PostStore, ReactionStore};
use crate::models::PostWithEngagement;
use error_types::{ServiceError, ServiceResult};
use std::sync::Arc;
use uuid::Uuid;

use super::storage_error;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    reactions: Arc<dyn ReactionStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, reactions: Arc<dyn ReactionStore>) -> Self {
        Self { posts, reactions }
    }

    /// Get a post by ID
    pub async fn get_post(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<PostWithEngagement> {
        let post = self
            .posts
            .find_one(&PostFilter::by_id(post_id))
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::NotFound {
                resource: "post",
                id: post_id.to_string(),
            })?;

        let mut reactions = self
            .reactions
            .reactions_for(user_id, &[post.id])
            .await
            .map_err(storage_error)?;

        let reaction = reactions.remove(&post.id);
        Ok(PostWithEngagement::new(post, reaction))
    }
}
