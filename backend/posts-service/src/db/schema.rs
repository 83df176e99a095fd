use sqlx::PgPool;
use tracing::info;

/// Ensure the post tables and their keyset indexes exist.
///
/// Runs at startup so a fresh database can serve the feed before
/// migrations have been applied.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring posts schema exists");

    for statement in [
        POSTS_TABLE,
        POSTS_KEYSET_INDEX,
        POSTS_TOPIC_KEYSET_INDEX,
        POSTS_AUTHOR_KEYSET_INDEX,
        POST_REACTIONS_TABLE,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id UUID PRIMARY KEY,
    author_id UUID NOT NULL,
    topic_id UUID,
    content TEXT NOT NULL DEFAULT '',
    reaction_count BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
)
"#;

const POSTS_KEYSET_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_created_at_id
    ON posts (created_at DESC, id DESC)
    WHERE deleted_at IS NULL
"#;

const POSTS_TOPIC_KEYSET_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_topic_created_at_id
    ON posts (topic_id, created_at DESC, id DESC)
    WHERE deleted_at IS NULL
"#;

const POSTS_AUTHOR_KEYSET_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_author_created_at_id
    ON posts (author_id, created_at DESC, id DESC)
    WHERE deleted_at IS NULL
"#;

const POST_REACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS post_reactions (
    post_id UUID NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id UUID NOT NULL,
    kind VARCHAR(32) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (post_id, user_id)
)
"#;
