use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use delingo_shared::types::{Comment, Post, SearchResults, Thread, UserId};
use tokio::sync::Mutex;

use crate::{ForumRepository, ForumRepositoryError};

#[derive(Default)]
struct ForumState {
    next_thread_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
    threads: BTreeMap<i64, Thread>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
}

impl ForumState {
    fn remove_post(&mut self, id: i64) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.comments.retain(|_, comment| comment.post_id != id);
        Some(post)
    }
}

/// In-memory forum store with the same cascade rules as the PostgreSQL schema.
#[derive(Default)]
pub struct InMemoryForumRepository {
    state: Mutex<ForumState>,
}

impl InMemoryForumRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ForumRepository for InMemoryForumRepository {
    async fn ping(&self) -> Result<(), ForumRepositoryError> {
        Ok(())
    }

    async fn create_thread(&self, user_id: UserId, title: &str) -> Result<Thread, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        state.next_thread_id += 1;
        let now = Utc::now();
        let thread = Thread {
            id: state.next_thread_id,
            user_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.threads.insert(thread.id, thread.clone());
        Ok(thread)
    }

    async fn get_thread(&self, id: i64) -> Result<Thread, ForumRepositoryError> {
        self.state
            .lock()
            .await
            .threads
            .get(&id)
            .cloned()
            .ok_or(ForumRepositoryError::not_found("thread", id))
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, ForumRepositoryError> {
        Ok(self.state.lock().await.threads.values().rev().cloned().collect())
    }

    async fn update_thread(&self, id: i64, title: &str) -> Result<Thread, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        let thread = state
            .threads
            .get_mut(&id)
            .ok_or(ForumRepositoryError::not_found("thread", id))?;
        thread.title = title.to_string();
        thread.updated_at = Utc::now();
        Ok(thread.clone())
    }

    async fn delete_thread(&self, id: i64) -> Result<(), ForumRepositoryError> {
        let mut state = self.state.lock().await;
        state
            .threads
            .remove(&id)
            .ok_or(ForumRepositoryError::not_found("thread", id))?;
        let post_ids: Vec<i64> = state
            .posts
            .values()
            .filter(|post| post.thread_id == id)
            .map(|post| post.id)
            .collect();
        for post_id in post_ids {
            state.remove_post(post_id);
        }
        Ok(())
    }

    async fn create_post(
        &self,
        user_id: UserId,
        thread_id: i64,
        content: &str,
    ) -> Result<Post, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.threads.contains_key(&thread_id) {
            return Err(ForumRepositoryError::not_found("thread", thread_id));
        }
        state.next_post_id += 1;
        let now = Utc::now();
        let post = Post {
            id: state.next_post_id,
            thread_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Post, ForumRepositoryError> {
        self.state
            .lock()
            .await
            .posts
            .get(&id)
            .cloned()
            .ok_or(ForumRepositoryError::not_found("post", id))
    }

    async fn list_posts(&self, thread_id: i64) -> Result<Vec<Post>, ForumRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .posts
            .values()
            .filter(|post| post.thread_id == thread_id)
            .cloned()
            .collect())
    }

    async fn update_post(&self, id: i64, content: &str) -> Result<Post, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        let post = state
            .posts
            .get_mut(&id)
            .ok_or(ForumRepositoryError::not_found("post", id))?;
        post.content = content.to_string();
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), ForumRepositoryError> {
        self.state
            .lock()
            .await
            .remove_post(id)
            .map(|_| ())
            .ok_or(ForumRepositoryError::not_found("post", id))
    }

    async fn create_comment(
        &self,
        user_id: UserId,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&post_id) {
            return Err(ForumRepositoryError::not_found("post", post_id));
        }
        state.next_comment_id += 1;
        let now = Utc::now();
        let comment = Comment {
            id: state.next_comment_id,
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: i64) -> Result<Comment, ForumRepositoryError> {
        self.state
            .lock()
            .await
            .comments
            .get(&id)
            .cloned()
            .ok_or(ForumRepositoryError::not_found("comment", id))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ForumRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, ForumRepositoryError> {
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(ForumRepositoryError::not_found("comment", id))?;
        comment.content = content.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), ForumRepositoryError> {
        self.state
            .lock()
            .await
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(ForumRepositoryError::not_found("comment", id))
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ForumRepositoryError> {
        let needle = query.to_lowercase();
        let state = self.state.lock().await;
        Ok(SearchResults {
            threads: state
                .threads
                .values()
                .rev()
                .filter(|thread| thread.title.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            posts: state
                .posts
                .values()
                .rev()
                .filter(|post| post.content.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        })
    }
}
