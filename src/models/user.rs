use std::hash::{Hash, Hasher};

use super::{DomainError, Podcast, validate_id, validate_non_empty};

/// A registered account. The username is the natural key: it is trimmed and
/// lower-cased at construction so lookups never depend on input casing.
#[derive(Debug, Clone)]
pub struct User {
    id: i32,
    username: String,
    password: String,
    subscriptions: Vec<PodcastSubscription>,
    playlist_ids: Vec<i32>,
}

impl User {
    pub fn new(id: i32, username: &str, password: &str) -> Result<Self, DomainError> {
        if password.trim().is_empty() {
            return Err(DomainError::EmptyField("password"));
        }
        Ok(Self {
            id: validate_id(id)?,
            username: validate_non_empty(username, "username")?.to_lowercase(),
            password: password.to_string(),
            subscriptions: Vec::new(),
            playlist_ids: Vec::new(),
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn subscriptions(&self) -> &[PodcastSubscription] {
        &self.subscriptions
    }

    pub fn add_subscription(&mut self, subscription: PodcastSubscription) {
        if !self.subscriptions.contains(&subscription) {
            self.subscriptions.push(subscription);
        }
    }

    pub fn remove_subscription(&mut self, subscription: &PodcastSubscription) {
        self.subscriptions.retain(|s| s != subscription);
    }

    /// Display-only; the repository is the authority on playlist ownership.
    pub fn playlist_ids(&self) -> &[i32] {
        &self.playlist_ids
    }

    pub fn add_playlist_id(&mut self, playlist_id: i32) {
        if !self.playlist_ids.contains(&playlist_id) {
            self.playlist_ids.push(playlist_id);
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct PodcastSubscription {
    id: i32,
    owner: User,
    podcast: Podcast,
}

impl PodcastSubscription {
    pub fn new(id: i32, owner: User, podcast: Podcast) -> Result<Self, DomainError> {
        Ok(Self {
            id: validate_id(id)?,
            owner,
            podcast,
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn owner(&self) -> &User {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: User) {
        self.owner = owner;
    }

    pub const fn podcast(&self) -> &Podcast {
        &self.podcast
    }

    pub fn set_podcast(&mut self, podcast: Podcast) {
        self.podcast = podcast;
    }
}

impl PartialEq for PodcastSubscription {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.owner == other.owner && self.podcast == other.podcast
    }
}

impl Eq for PodcastSubscription {}

impl Hash for PodcastSubscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.id, self.owner.id(), self.podcast.id()).hash(state);
    }
}
