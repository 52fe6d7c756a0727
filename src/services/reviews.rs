//! Review submission and retrieval.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{DomainError, Review, ReviewTarget, User};
use crate::repository::CatalogueRepository;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

pub struct ReviewService {
    repo: Arc<dyn CatalogueRepository>,
}

impl ReviewService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogueRepository>) -> Self {
        Self { repo }
    }

    /// Submits a podcast review under the next review id. The 0..=10 rating
    /// bound is enforced by the domain model before anything is stored.
    pub async fn review_podcast(
        &self,
        user: &User,
        podcast_id: i32,
        rating: i32,
        content: &str,
    ) -> Result<Review, ReviewError> {
        let count = self.repo.get_number_of_reviews().await?;
        let next_id = i32::try_from(count).unwrap_or(i32::MAX - 1) + 1;
        let review = Review::new(
            next_id,
            user.clone(),
            rating,
            content,
            ReviewTarget::Podcast(podcast_id),
        )?;
        self.repo.save_review(review.clone()).await?;
        Ok(review)
    }

    pub async fn reviews_for_podcast(&self, podcast_id: i32) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repo.get_reviews_for_podcast(podcast_id).await?)
    }
}
