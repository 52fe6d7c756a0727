use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveTime};

use super::{DomainError, validate_id, validate_non_empty};

/// One published episode. Identity is the (id, podcast id) pair: the source
/// data reuses numeric episode ids across podcasts, so the id alone does not
/// name an episode.
#[derive(Debug, Clone)]
pub struct Episode {
    id: i32,
    podcast_id: i32,
    title: String,
    audio: String,
    audio_len: i32,
    description: String,
    pub_date: NaiveDate,
    pub_time: NaiveTime,
}

impl Episode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        podcast_id: i32,
        title: &str,
        audio: &str,
        audio_len: i32,
        description: &str,
        pub_date: NaiveDate,
        pub_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        if audio_len < 0 {
            return Err(DomainError::NegativeId);
        }
        Ok(Self {
            id: validate_id(id)?,
            podcast_id: validate_id(podcast_id)?,
            title: validate_non_empty(title, "episode title")?,
            audio: audio.to_string(),
            audio_len,
            description: description.to_string(),
            pub_date,
            pub_time,
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn podcast_id(&self) -> i32 {
        self.podcast_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = validate_non_empty(title, "episode title")?;
        Ok(())
    }

    pub fn audio(&self) -> &str {
        &self.audio
    }

    pub fn set_audio(&mut self, audio: &str) {
        self.audio = audio.to_string();
    }

    pub const fn audio_len(&self) -> i32 {
        self.audio_len
    }

    pub fn set_audio_len(&mut self, audio_len: i32) -> Result<(), DomainError> {
        if audio_len < 0 {
            return Err(DomainError::NegativeId);
        }
        self.audio_len = audio_len;
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> Result<(), DomainError> {
        self.description = validate_non_empty(description, "episode description")?;
        Ok(())
    }

    pub const fn pub_date(&self) -> NaiveDate {
        self.pub_date
    }

    pub const fn pub_time(&self) -> NaiveTime {
        self.pub_time
    }
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.podcast_id == other.podcast_id
    }
}

impl Eq for Episode {}

impl Hash for Episode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.id, self.podcast_id).hash(state);
    }
}

impl PartialOrd for Episode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Episode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.podcast_id, self.id).cmp(&(other.podcast_id, other.id))
    }
}
