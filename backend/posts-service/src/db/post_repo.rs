use super::{PostFilter, PostStore, SortOrder};
use crate::models::Post;
use async_trait::async_trait;
use error_types::DatabaseError;
use sqlx::{PgPool, Postgres, QueryBuilder};

const POST_COLUMNS: &str =
    "SELECT id, author_id, topic_id, content, reaction_count, created_at, updated_at FROM posts";

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for `filter`, binding only the present dimensions.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    qb.push(" WHERE deleted_at IS NULL");

    if let Some(id) = filter.id {
        qb.push(" AND id = ").push_bind(id);
    }
    if let Some(topic_id) = filter.topic_id {
        qb.push(" AND topic_id = ").push_bind(topic_id);
    }
    if let Some(author_id) = filter.author_id {
        qb.push(" AND author_id = ").push_bind(author_id);
    }
    if let Some(bound) = filter.before {
        match bound.id {
            Some(id) => {
                qb.push(" AND (created_at, id) < (")
                    .push_bind(bound.created_at)
                    .push(", ")
                    .push_bind(id)
                    .push(")");
            }
            None => {
                qb.push(" AND created_at < ").push_bind(bound.created_at);
            }
        }
    }
    if let Some(after) = filter.created_after {
        qb.push(" AND created_at > ").push_bind(after);
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<Post>> {
        let mut qb = QueryBuilder::<Postgres>::new(POST_COLUMNS);
        push_filter(&mut qb, filter);
        qb.push(order.sql());
        qb.push(" LIMIT ").push_bind(limit as i64);
        qb.push(" OFFSET ").push_bind(skip as i64);

        let posts = qb
            .build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(posts)
    }

    async fn count(&self, filter: &PostFilter) -> anyhow::Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        push_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(count.max(0) as u64)
    }

    async fn find_one(&self, filter: &PostFilter) -> anyhow::Result<Option<Post>> {
        let mut posts = self.find(filter, SortOrder::NewestFirst, 0, 1).await?;
        Ok(posts.pop())
    }
}
