//! This module defines the `ForumRepository` trait, which abstracts the
//! persistence of threads, posts and comments.
use async_trait::async_trait;
use delingo_shared::types::{Comment, Post, SearchResults, Thread, UserId};

use crate::errors::ForumRepositoryError;

/// A trait that defines the interface for interacting with the forum store.
///
/// Lookups, updates and deletes of a missing row fail with
/// `ForumRepositoryError::NotFound`. Deleting a thread removes its posts, and
/// deleting a post removes its comments.
///
/// Votes are not part of the cascade. Votes on a deleted thread or post stay
/// in the votes store and keep appearing in user vote lists and tallies.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), ForumRepositoryError>;

    async fn create_thread(&self, user_id: UserId, title: &str) -> Result<Thread, ForumRepositoryError>;
    async fn get_thread(&self, id: i64) -> Result<Thread, ForumRepositoryError>;
    /// Lists all threads, newest first.
    async fn list_threads(&self) -> Result<Vec<Thread>, ForumRepositoryError>;
    async fn update_thread(&self, id: i64, title: &str) -> Result<Thread, ForumRepositoryError>;
    async fn delete_thread(&self, id: i64) -> Result<(), ForumRepositoryError>;

    /// Creates a post in `thread_id`, failing with `NotFound` if the thread does not exist.
    async fn create_post(
        &self,
        user_id: UserId,
        thread_id: i64,
        content: &str,
    ) -> Result<Post, ForumRepositoryError>;
    async fn get_post(&self, id: i64) -> Result<Post, ForumRepositoryError>;
    /// Lists the posts of a thread, oldest first.
    async fn list_posts(&self, thread_id: i64) -> Result<Vec<Post>, ForumRepositoryError>;
    async fn update_post(&self, id: i64, content: &str) -> Result<Post, ForumRepositoryError>;
    async fn delete_post(&self, id: i64) -> Result<(), ForumRepositoryError>;

    /// Creates a comment on `post_id`, failing with `NotFound` if the post does not exist.
    async fn create_comment(
        &self,
        user_id: UserId,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, ForumRepositoryError>;
    async fn get_comment(&self, id: i64) -> Result<Comment, ForumRepositoryError>;
    /// Lists the comments of a post, oldest first.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ForumRepositoryError>;
    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, ForumRepositoryError>;
    async fn delete_comment(&self, id: i64) -> Result<(), ForumRepositoryError>;

    /// Case-insensitive substring search over thread titles and post contents.
    ///
    /// The query is matched literally; SQL wildcard characters carry no meaning.
    async fn search(&self, query: &str) -> Result<SearchResults, ForumRepositoryError>;
}
