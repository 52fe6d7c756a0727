use std::hash::{Hash, Hasher};

use super::{DomainError, User, validate_id, validate_non_empty};

/// What a review is attached to. Exactly one target exists at a time by
/// construction; switching target kinds replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Podcast(i32),
    Episode(i32),
}

#[derive(Debug, Clone)]
pub struct Review {
    id: i32,
    user: User,
    rating: i32,
    content: String,
    target: ReviewTarget,
}

impl Review {
    pub fn new(
        id: i32,
        user: User,
        rating: i32,
        content: &str,
        target: ReviewTarget,
    ) -> Result<Self, DomainError> {
        if !(0..=10).contains(&rating) {
            return Err(DomainError::RatingOutOfRange);
        }
        Ok(Self {
            id: validate_id(id)?,
            user,
            rating,
            content: content.to_string(),
            target,
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn user(&self) -> &User {
        &self.user
    }

    pub fn set_user(&mut self, user: User) {
        self.user = user;
    }

    pub const fn rating(&self) -> i32 {
        self.rating
    }

    pub fn set_rating(&mut self, rating: i32) -> Result<(), DomainError> {
        if !(0..=10).contains(&rating) {
            return Err(DomainError::RatingOutOfRange);
        }
        self.rating = rating;
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) -> Result<(), DomainError> {
        self.content = validate_non_empty(content, "review content")?;
        Ok(())
    }

    pub const fn target(&self) -> ReviewTarget {
        self.target
    }

    pub const fn podcast_id(&self) -> Option<i32> {
        match self.target {
            ReviewTarget::Podcast(id) => Some(id),
            ReviewTarget::Episode(_) => None,
        }
    }

    pub const fn episode_id(&self) -> Option<i32> {
        match self.target {
            ReviewTarget::Episode(id) => Some(id),
            ReviewTarget::Podcast(_) => None,
        }
    }

    /// Re-targets the review at a podcast, clearing any episode target.
    pub fn set_podcast_id(&mut self, podcast_id: i32) {
        self.target = ReviewTarget::Podcast(podcast_id);
    }

    /// Re-targets the review at an episode, clearing any podcast target.
    pub fn set_episode_id(&mut self, episode_id: i32) {
        self.target = ReviewTarget::Episode(episode_id);
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Review {}

impl Hash for Review {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
