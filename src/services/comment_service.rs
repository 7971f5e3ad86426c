//! Domain service for title comments.

use thiserror::Error;

use crate::domain::{TitleId, UserId};
use crate::models::engagement::Comment;
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Title not found: {0}")]
    TitleNotFound(TitleId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(CommentError);

#[async_trait::async_trait]
pub trait CommentService: Send + Sync {
    /// Appends a comment and grants comment XP to its author in the same
    /// transaction.
    async fn post_comment(
        &self,
        user: UserId,
        title: TitleId,
        content: &str,
    ) -> Result<Comment, CommentError>;

    /// Newest first.
    async fn list_comments(&self, title: TitleId) -> Result<Vec<Comment>, CommentError>;
}
