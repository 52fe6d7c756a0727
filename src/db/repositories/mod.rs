pub mod playlist;
pub mod podcast;
pub mod review;
pub mod user;

use crate::entities::{episodes, users};
use crate::models::{DomainError, Episode, User};

pub(crate) fn user_to_domain(model: &users::Model) -> Result<User, DomainError> {
    User::new(model.id, &model.username, &model.password)
}

pub(crate) fn episode_to_domain(model: episodes::Model) -> Result<Episode, DomainError> {
    Episode::new(
        model.id,
        model.podcast_id,
        &model.title,
        model.audio_url.as_deref().unwrap_or_default(),
        model.audio_len,
        model.description.as_deref().unwrap_or_default(),
        model.pub_date,
        model.pub_time,
    )
}
