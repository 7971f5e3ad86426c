//! `SeaORM` implementation of the `CommentService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::{TitleId, UserId};
use crate::models::engagement::Comment;
use crate::services::comment_service::{CommentError, CommentService};

pub const MAX_COMMENT_LEN: usize = 1000;

pub struct SeaOrmCommentService {
    store: Store,
    xp_per_comment: u64,
}

impl SeaOrmCommentService {
    #[must_use]
    pub const fn new(store: Store, xp_per_comment: u64) -> Self {
        Self {
            store,
            xp_per_comment,
        }
    }
}

pub fn normalize_comment(content: &str) -> Result<&str, CommentError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CommentError::Validation(
            "Comment cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(CommentError::Validation(format!(
            "Comment must be {MAX_COMMENT_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

#[async_trait]
impl CommentService for SeaOrmCommentService {
    async fn post_comment(
        &self,
        user: UserId,
        title: TitleId,
        content: &str,
    ) -> Result<Comment, CommentError> {
        let content = normalize_comment(content)?;

        if !self.store.title_exists(title).await? {
            return Err(CommentError::TitleNotFound(title));
        }

        let comment = self
            .store
            .add_comment(user, title, content, self.xp_per_comment)
            .await?;

        if self.xp_per_comment > 0 {
            metrics::counter!("engagement_xp_granted_total", "source" => "comment")
                .increment(self.xp_per_comment);
        }
        info!(user_id = %user, title_id = %title, comment_id = comment.id, "Posted comment");
        Ok(comment)
    }

    async fn list_comments(&self, title: TitleId) -> Result<Vec<Comment>, CommentError> {
        Ok(self.store.list_comments(title).await?)
    }
}
