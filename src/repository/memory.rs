//! Process-lifetime reference backend over plain ordered containers.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ingest;
use crate::models::{Author, Category, Episode, Playlist, Podcast, Review, User};

use super::{CatalogueRepository, EntityKey, matches_search, title_sort_key};

#[derive(Debug)]
struct MemoryState {
    authors: Vec<Author>,
    categories: Vec<Category>,
    podcasts: Vec<Podcast>,
    episodes: Vec<Episode>,
    users: Vec<User>,
    reviews: Vec<Review>,
    playlists: Vec<Playlist>,
    next_playlist_id: i32,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            authors: Vec::new(),
            categories: Vec::new(),
            podcasts: Vec::new(),
            episodes: Vec::new(),
            users: Vec::new(),
            reviews: Vec::new(),
            playlists: Vec::new(),
            next_playlist_id: 1,
        }
    }
}

/// In-memory implementation of [`CatalogueRepository`].
///
/// Lookups are linear scans; the coarse lock serializes writers, which is
/// all the single-writer contract asks for. Playlist ids come from a
/// counter that survives deletions, so allocation stays monotonic for the
/// life of the process.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers any of the podcast's categories the repository has not seen
    /// yet, keeping the category collection a superset of every category
    /// referenced by any podcast.
    fn insert_podcast(state: &mut MemoryState, podcast: Podcast) {
        for category in podcast.categories() {
            if !state.categories.contains(category) {
                state.categories.push(category.clone());
            }
        }
        state.podcasts.push(podcast);
    }
}

#[async_trait]
impl CatalogueRepository for MemoryRepository {
    async fn add_author(&self, author: Author) -> Result<()> {
        self.state.write().await.authors.push(author);
        Ok(())
    }

    async fn get_author(&self, key: EntityKey) -> Result<Option<Author>> {
        let state = self.state.read().await;
        let found = match key {
            EntityKey::ById(id) => state.authors.iter().find(|a| a.id() == id),
            EntityKey::ByName(ref name) => state.authors.iter().find(|a| a.name() == name),
        };
        Ok(found.cloned())
    }

    async fn get_authors(&self) -> Result<Vec<Author>> {
        Ok(self.state.read().await.authors.clone())
    }

    async fn add_podcast(&self, podcast: Podcast) -> Result<()> {
        let mut state = self.state.write().await;
        Self::insert_podcast(&mut state, podcast);
        Ok(())
    }

    async fn get_podcast(&self, key: EntityKey) -> Result<Option<Podcast>> {
        let state = self.state.read().await;
        let found = match key {
            EntityKey::ById(id) => state.podcasts.iter().find(|p| p.id() == id),
            EntityKey::ByName(ref title) => state.podcasts.iter().find(|p| p.title() == title),
        };
        Ok(found.cloned())
    }

    async fn get_podcasts(&self) -> Result<Vec<Podcast>> {
        Ok(self.state.read().await.podcasts.clone())
    }

    async fn get_podcasts_by_name(&self) -> Result<Vec<Podcast>> {
        let mut podcasts = self.state.read().await.podcasts.clone();
        podcasts.sort_by_key(|p| title_sort_key(p.title()));
        Ok(podcasts)
    }

    async fn get_number_of_podcasts(&self) -> Result<u64> {
        Ok(self.state.read().await.podcasts.len() as u64)
    }

    async fn add_category(&self, category: Category) -> Result<()> {
        self.state.write().await.categories.push(category);
        Ok(())
    }

    async fn get_category(&self, key: EntityKey) -> Result<Option<Category>> {
        let state = self.state.read().await;
        let found = match key {
            EntityKey::ById(id) => state.categories.iter().find(|c| c.id() == id),
            EntityKey::ByName(ref name) => state.categories.iter().find(|c| c.name() == name),
        };
        Ok(found.cloned())
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        Ok(self.state.read().await.categories.clone())
    }

    async fn get_episodes_for_podcast(&self, podcast_id: i32) -> Result<Vec<Episode>> {
        let state = self.state.read().await;
        Ok(state
            .episodes
            .iter()
            .filter(|e| e.podcast_id() == podcast_id)
            .cloned()
            .collect())
    }

    async fn add_user(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username() == user.username()) {
            return Ok(());
        }
        state.users.push(user);
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        let username = username.trim().to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn save_review(&self, review: Review) -> Result<()> {
        self.state.write().await.reviews.push(review);
        Ok(())
    }

    async fn get_reviews_for_podcast(&self, podcast_id: i32) -> Result<Vec<Review>> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.podcast_id() == Some(podcast_id))
            .cloned()
            .collect())
    }

    async fn get_number_of_reviews(&self) -> Result<u64> {
        Ok(self.state.read().await.reviews.len() as u64)
    }

    async fn add_playlist(&self, playlist: Playlist) -> Result<()> {
        self.state.write().await.playlists.push(playlist);
        Ok(())
    }

    async fn get_playlist(&self, playlist_id: i32) -> Result<Option<Playlist>> {
        let state = self.state.read().await;
        Ok(state
            .playlists
            .iter()
            .find(|p| p.id() == playlist_id)
            .cloned())
    }

    async fn get_playlists_for_user(&self, user: &User) -> Result<Vec<Playlist>> {
        let state = self.state.read().await;
        Ok(state
            .playlists
            .iter()
            .filter(|p| p.owner() == user)
            .cloned()
            .collect())
    }

    async fn next_playlist_id(&self) -> Result<i32> {
        let mut state = self.state.write().await;
        let id = state.next_playlist_id;
        state.next_playlist_id += 1;
        Ok(id)
    }

    async fn save_playlist(&self, playlist: Playlist) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.playlists.iter_mut().find(|p| p.id() == playlist.id()) {
            *existing = playlist;
        } else {
            state.playlists.push(playlist);
        }
        Ok(())
    }

    async fn search_podcasts_by_title(&self, term: &str) -> Result<Vec<Podcast>> {
        let state = self.state.read().await;
        Ok(state
            .podcasts
            .iter()
            .filter(|p| matches_search(p.title(), term))
            .cloned()
            .collect())
    }

    async fn search_podcasts_by_author(&self, term: &str) -> Result<Vec<Podcast>> {
        let state = self.state.read().await;
        Ok(state
            .podcasts
            .iter()
            .filter(|p| matches_search(p.author_name(), term))
            .cloned()
            .collect())
    }

    async fn search_podcasts_by_category(&self, term: &str) -> Result<Vec<Podcast>> {
        let state = self.state.read().await;
        Ok(state
            .podcasts
            .iter()
            .filter(|p| p.categories().iter().any(|c| matches_search(c.name(), term)))
            .cloned()
            .collect())
    }

    async fn populate(&self, podcasts_csv: &Path, episodes_csv: &Path) -> Result<()> {
        let data = ingest::read_catalogue(podcasts_csv, episodes_csv)?;

        let mut state = self.state.write().await;
        state.authors.extend(data.authors);
        for category in data.categories {
            if !state.categories.contains(&category) {
                state.categories.push(category);
            }
        }
        for podcast in data.podcasts {
            Self::insert_podcast(&mut state, podcast);
        }
        state.episodes.extend(data.episodes);

        Ok(())
    }
}
