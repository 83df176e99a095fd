use super::ReactionStore;
use async_trait::async_trait;
use error_types::DatabaseError;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

/// PostgreSQL-backed reaction store
#[derive(Clone)]
pub struct PgReactionStore {
    pool: PgPool,
}

impl PgReactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionStore for PgReactionStore {
    async fn reactions_for(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, String>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT post_id, kind
            FROM post_reactions
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let mut reactions = HashMap::with_capacity(rows.len());
        for row in rows {
            let post_id: Uuid = row.try_get("post_id").map_err(DatabaseError::from)?;
            let kind: String = row.try_get("kind").map_err(DatabaseError::from)?;
            reactions.insert(post_id, kind);
        }

        Ok(reactions)
    }
}
