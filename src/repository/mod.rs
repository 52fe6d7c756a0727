//! The one data-access contract the rest of the application depends on.
//!
//! Two backends implement it: [`memory::MemoryRepository`] for
//! process-lifetime state and [`crate::db::Store`] for durable SQLite
//! storage. Both must behave identically for every operation here; the
//! shared contract test suite under `tests/` pins that equivalence.

pub mod memory;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Author, Category, Episode, Playlist, Podcast, Review, User};

/// Lookup key for entities addressable by id or by exact name.
///
/// The two variants are the only supported lookup modes; anything else is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    ById(i32),
    ByName(String),
}

impl From<i32> for EntityKey {
    fn from(id: i32) -> Self {
        Self::ById(id)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

/// Repository contract over the podcast catalogue and its user content.
///
/// Lookups that match nothing return `Ok(None)` (or an empty `Vec`) on every
/// backend; `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    async fn add_author(&self, author: Author) -> Result<()>;
    async fn get_author(&self, key: EntityKey) -> Result<Option<Author>>;
    async fn get_authors(&self) -> Result<Vec<Author>>;

    async fn add_podcast(&self, podcast: Podcast) -> Result<()>;
    /// `ByName` matches the exact title.
    async fn get_podcast(&self, key: EntityKey) -> Result<Option<Podcast>>;
    async fn get_podcasts(&self) -> Result<Vec<Podcast>>;
    /// The catalogue in browse order; see [`title_sort_key`].
    async fn get_podcasts_by_name(&self) -> Result<Vec<Podcast>>;
    async fn get_number_of_podcasts(&self) -> Result<u64>;

    async fn add_category(&self, category: Category) -> Result<()>;
    async fn get_category(&self, key: EntityKey) -> Result<Option<Category>>;
    async fn get_categories(&self) -> Result<Vec<Category>>;

    async fn get_episodes_for_podcast(&self, podcast_id: i32) -> Result<Vec<Episode>>;

    /// Adding a username that already exists is a silent no-op, which keeps
    /// seeding idempotent.
    async fn add_user(&self, user: User) -> Result<()>;
    /// Case-insensitive: the stored username is lower-cased and so is the
    /// lookup.
    async fn get_user(&self, username: &str) -> Result<Option<User>>;
    async fn get_users(&self) -> Result<Vec<User>>;

    async fn save_review(&self, review: Review) -> Result<()>;
    async fn get_reviews_for_podcast(&self, podcast_id: i32) -> Result<Vec<Review>>;
    async fn get_number_of_reviews(&self) -> Result<u64>;

    async fn add_playlist(&self, playlist: Playlist) -> Result<()>;
    async fn get_playlist(&self, playlist_id: i32) -> Result<Option<Playlist>>;
    async fn get_playlists_for_user(&self, user: &User) -> Result<Vec<Playlist>>;
    /// Monotonic and gap-tolerant: ids of removed playlists are never reused.
    async fn next_playlist_id(&self) -> Result<i32>;
    /// Upsert: replaces an existing playlist with the same id, else inserts.
    async fn save_playlist(&self, playlist: Playlist) -> Result<()>;

    async fn search_podcasts_by_title(&self, term: &str) -> Result<Vec<Podcast>>;
    async fn search_podcasts_by_author(&self, term: &str) -> Result<Vec<Podcast>>;
    async fn search_podcasts_by_category(&self, term: &str) -> Result<Vec<Podcast>>;

    /// Runs the bulk importer over the two datasets and loads everything in
    /// dependency order: authors, categories, podcasts, episodes.
    async fn populate(&self, podcasts_csv: &Path, episodes_csv: &Path) -> Result<()>;
}

/// Browse-order sort key for titles: the lower-cased alphabetic characters
/// when the title leads with a letter, otherwise `z` + title so symbol- and
/// digit-led titles sink to the end of the catalogue.
#[must_use]
pub fn title_sort_key(title: &str) -> String {
    let alphabetic: String = title
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if !alphabetic.is_empty() && title.chars().next().is_some_and(char::is_alphabetic) {
        alphabetic
    } else {
        format!("z{title}")
    }
}

/// Case-insensitive substring match on a trimmed search term.
#[must_use]
pub fn matches_search(value: &str, term: &str) -> bool {
    value.to_lowercase().contains(&term.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_strips_non_alphabetics() {
        assert_eq!(title_sort_key("The Tiny Show!"), "thetinyshow");
    }

    #[test]
    fn sort_key_sinks_titles_without_a_leading_letter() {
        assert_eq!(title_sort_key("99% Invisible"), "z99% Invisible");
        assert_eq!(title_sort_key("#Fandom"), "z#Fandom");
    }

    #[test]
    fn search_match_is_case_insensitive_and_trimmed() {
        assert!(matches_search("Comedy Central", "  comedy "));
        assert!(!matches_search("Comedy Central", "drama"));
    }
}
