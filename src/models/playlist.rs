use std::hash::{Hash, Hasher};

use super::{DomainError, Episode, Podcast, User, validate_id, validate_non_empty};

/// A user-curated list of episodes and podcasts. Appends are not
/// deduplicated: queuing the same episode twice is allowed.
#[derive(Debug, Clone)]
pub struct Playlist {
    id: i32,
    name: String,
    owner: User,
    episodes: Vec<Episode>,
    podcasts: Vec<Podcast>,
}

impl Playlist {
    pub fn new(id: i32, name: &str, owner: User) -> Result<Self, DomainError> {
        Ok(Self {
            id: validate_id(id)?,
            name: validate_non_empty(name, "playlist name")?,
            owner,
            episodes: Vec::new(),
            podcasts: Vec::new(),
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = validate_non_empty(name, "playlist name")?;
        Ok(())
    }

    pub const fn owner(&self) -> &User {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: User) {
        self.owner = owner;
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn add_episode(&mut self, episode: Episode) {
        self.episodes.push(episode);
    }

    /// Removes the first matching occurrence, if any.
    pub fn remove_episode(&mut self, episode: &Episode) {
        if let Some(pos) = self.episodes.iter().position(|e| e == episode) {
            self.episodes.remove(pos);
        }
    }

    pub fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    pub fn add_podcast(&mut self, podcast: Podcast) {
        self.podcasts.push(podcast);
    }

    pub fn remove_podcast(&mut self, podcast: &Podcast) {
        if let Some(pos) = self.podcasts.iter().position(|p| p == podcast) {
            self.podcasts.remove(pos);
        }
    }
}

impl PartialEq for Playlist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Playlist {}

impl Hash for Playlist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
