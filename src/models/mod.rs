pub mod episode;
pub mod playlist;
pub mod podcast;
pub mod review;
pub mod user;

pub use episode::Episode;
pub use playlist::Playlist;
pub use podcast::{Author, Category, Podcast};
pub use review::{Review, ReviewTarget};
pub use user::{PodcastSubscription, User};

use thiserror::Error;

/// Validation failure raised at entity construction or mutation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("id must be a non-negative integer")]
    NegativeId,

    #[error("{0} must be a non-empty string")]
    EmptyField(&'static str),

    #[error("rating must be between 0 and 10")]
    RatingOutOfRange,
}

pub(crate) fn validate_id(id: i32) -> Result<i32, DomainError> {
    if id < 0 {
        return Err(DomainError::NegativeId);
    }
    Ok(id)
}

pub(crate) fn validate_non_empty(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
