use super::ApiError;
use crate::domain::{EpisodeId, TitleId, UserId};

const MAX_LIMIT: u64 = 100;

fn positive_id(kind: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {kind} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_title_id(id: i32) -> Result<TitleId, ApiError> {
    positive_id("title", id).map(TitleId::new)
}

pub fn validate_episode_id(id: i32) -> Result<EpisodeId, ApiError> {
    positive_id("episode", id).map(EpisodeId::new)
}

pub fn validate_user_id(id: i32) -> Result<UserId, ApiError> {
    positive_id("user", id).map(UserId::new)
}

/// `None` passes through so the service can apply its configured default.
pub fn validate_limit(limit: Option<u64>) -> Result<Option<u64>, ApiError> {
    match limit {
        Some(limit) if !(1..=MAX_LIMIT).contains(&limit) => Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between 1 and {MAX_LIMIT}"
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ids() {
        assert_eq!(validate_title_id(1).unwrap(), TitleId::new(1));
        assert!(validate_title_id(0).is_err());
        assert!(validate_episode_id(-1).is_err());
        assert!(validate_user_id(12345).is_ok());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), None);
        assert_eq!(validate_limit(Some(1)).unwrap(), Some(1));
        assert_eq!(validate_limit(Some(100)).unwrap(), Some(100));
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(101)).is_err());
    }
}
