//! Playlist curation over the repository contract.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{DomainError, Episode, Playlist, Podcast, User};
use crate::repository::CatalogueRepository;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Playlist not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<anyhow::Error> for PlaylistError {
    fn from(err: anyhow::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

pub struct PlaylistService {
    repo: Arc<dyn CatalogueRepository>,
}

impl PlaylistService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogueRepository>) -> Self {
        Self { repo }
    }

    /// Creates an empty playlist under a repository-allocated id.
    pub async fn create(&self, owner: &User, name: &str) -> Result<Playlist, PlaylistError> {
        let id = self.repo.next_playlist_id().await?;
        let playlist = Playlist::new(id, name, owner.clone())?;
        self.repo.add_playlist(playlist.clone()).await?;
        Ok(playlist)
    }

    pub async fn playlists_for(&self, user: &User) -> Result<Vec<Playlist>, PlaylistError> {
        Ok(self.repo.get_playlists_for_user(user).await?)
    }

    pub async fn add_episode(
        &self,
        playlist_id: i32,
        episode: Episode,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.get(playlist_id).await?;
        playlist.add_episode(episode);
        self.repo.save_playlist(playlist.clone()).await?;
        Ok(playlist)
    }

    pub async fn remove_episode(
        &self,
        playlist_id: i32,
        episode: &Episode,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.get(playlist_id).await?;
        playlist.remove_episode(episode);
        self.repo.save_playlist(playlist.clone()).await?;
        Ok(playlist)
    }

    pub async fn add_podcast(
        &self,
        playlist_id: i32,
        podcast: Podcast,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.get(playlist_id).await?;
        playlist.add_podcast(podcast);
        self.repo.save_playlist(playlist.clone()).await?;
        Ok(playlist)
    }

    pub async fn remove_podcast(
        &self,
        playlist_id: i32,
        podcast: &Podcast,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.get(playlist_id).await?;
        playlist.remove_podcast(podcast);
        self.repo.save_playlist(playlist.clone()).await?;
        Ok(playlist)
    }

    async fn get(&self, playlist_id: i32) -> Result<Playlist, PlaylistError> {
        self.repo
            .get_playlist(playlist_id)
            .await?
            .ok_or(PlaylistError::NotFound)
    }
}
