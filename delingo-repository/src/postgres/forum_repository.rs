//! PostgreSQL implementation of the forum repository.
//!
//! ## Database Tables
//!
//! - `threads`: Discussion threads
//! - `posts`: Posts, cascading on thread deletion
//! - `comments`: Comments, cascading on post deletion
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use delingo_shared::types::{Comment, Post, SearchResults, Thread, UserId};

use crate::{ForumRepository, ForumRepositoryError};

#[derive(sqlx::FromRow)]
struct ThreadRow {
    id: i64,
    user_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ThreadRow> for Thread {
    fn from(row: ThreadRow) -> Self {
        Thread {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    thread_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            thread_id: row.thread_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Builds an `ILIKE` pattern matching `query` as a literal substring.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Maps a foreign key violation on insert to `NotFound` for the parent row.
fn parent_not_found(
    error: sqlx::Error,
    entity: &'static str,
    id: i64,
) -> ForumRepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            ForumRepositoryError::not_found(entity, id)
        }
        _ => ForumRepositoryError::DatabaseError(error),
    }
}

/// PostgreSQL implementation of the forum repository.
pub struct PostgresForumRepository {
    pool: sqlx::PgPool,
}

impl PostgresForumRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the forum schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(
        &self,
        table_sql: &'static str,
        entity: &'static str,
        id: i64,
    ) -> Result<(), ForumRepositoryError> {
        let result = sqlx::query(table_sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(ForumRepositoryError::not_found(entity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn ping(&self) -> Result<(), ForumRepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_thread(&self, user_id: UserId, title: &str) -> Result<Thread, ForumRepositoryError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO threads (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_thread(&self, id: i64) -> Result<Thread, ForumRepositoryError> {
        sqlx::query_as::<_, ThreadRow>(
            "SELECT id, user_id, title, created_at, updated_at FROM threads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Thread::from)
        .ok_or(ForumRepositoryError::not_found("thread", id))
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, ForumRepositoryError> {
        let rows = sqlx::query_as::<_, ThreadRow>(
            "SELECT id, user_id, title, created_at, updated_at FROM threads ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Thread::from).collect())
    }

    async fn update_thread(&self, id: i64, title: &str) -> Result<Thread, ForumRepositoryError> {
        sqlx::query_as::<_, ThreadRow>(
            r#"
            UPDATE threads SET title = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?
        .map(Thread::from)
        .ok_or(ForumRepositoryError::not_found("thread", id))
    }

    async fn delete_thread(&self, id: i64) -> Result<(), ForumRepositoryError> {
        self.delete_by_id("DELETE FROM threads WHERE id = $1", "thread", id).await
    }

    async fn create_post(
        &self,
        user_id: UserId,
        thread_id: i64,
        content: &str,
    ) -> Result<Post, ForumRepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (thread_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, thread_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(thread_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| parent_not_found(e, "thread", thread_id))?;
        Ok(row.into())
    }

    async fn get_post(&self, id: i64) -> Result<Post, ForumRepositoryError> {
        sqlx::query_as::<_, PostRow>(
            "SELECT id, thread_id, user_id, content, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Post::from)
        .ok_or(ForumRepositoryError::not_found("post", id))
    }

    async fn list_posts(&self, thread_id: i64) -> Result<Vec<Post>, ForumRepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, thread_id, user_id, content, created_at, updated_at
            FROM posts
            WHERE thread_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update_post(&self, id: i64, content: &str) -> Result<Post, ForumRepositoryError> {
        sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts SET content = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, thread_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .map(Post::from)
        .ok_or(ForumRepositoryError::not_found("post", id))
    }

    async fn delete_post(&self, id: i64) -> Result<(), ForumRepositoryError> {
        self.delete_by_id("DELETE FROM posts WHERE id = $1", "post", id).await
    }

    async fn create_comment(
        &self,
        user_id: UserId,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, ForumRepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| parent_not_found(e, "post", post_id))?;
        Ok(row.into())
    }

    async fn get_comment(&self, id: i64) -> Result<Comment, ForumRepositoryError> {
        sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, user_id, content, created_at, updated_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Comment::from)
        .ok_or(ForumRepositoryError::not_found("comment", id))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ForumRepositoryError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, ForumRepositoryError> {
        sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments SET content = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, post_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .map(Comment::from)
        .ok_or(ForumRepositoryError::not_found("comment", id))
    }

    async fn delete_comment(&self, id: i64) -> Result<(), ForumRepositoryError> {
        self.delete_by_id("DELETE FROM comments WHERE id = $1", "comment", id).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ForumRepositoryError> {
        let pattern = like_pattern(query);

        let threads = sqlx::query_as::<_, ThreadRow>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM threads
            WHERE title ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        let posts = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, thread_id, user_id, content, created_at, updated_at
            FROM posts
            WHERE content ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(SearchResults {
            threads: threads.into_iter().map(Thread::from).collect(),
            posts: posts.into_iter().map(Post::from).collect(),
        })
    }
}
