//! Catalogue browsing: paging and per-podcast detail.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{Episode, Podcast};
use crate::repository::{CatalogueRepository, EntityKey};

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<anyhow::Error> for CatalogueError {
    fn from(err: anyhow::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

/// One slice of the browse listing; page numbers are 1-based.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub struct CatalogueService {
    repo: Arc<dyn CatalogueRepository>,
}

impl CatalogueService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogueRepository>) -> Self {
        Self { repo }
    }

    /// Pages through the catalogue in browse (title) order. Out-of-range
    /// page numbers clamp to the nearest valid page.
    pub async fn browse(&self, page: usize, page_size: usize) -> Result<Page<Podcast>, CatalogueError> {
        let podcasts = self.repo.get_podcasts_by_name().await?;
        let total_items = podcasts.len();
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let items = podcasts
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(Page {
            items,
            page,
            total_pages,
            total_items,
        })
    }

    pub async fn podcast_details(
        &self,
        podcast_id: i32,
    ) -> Result<Option<(Podcast, Vec<Episode>)>, CatalogueError> {
        let Some(podcast) = self.repo.get_podcast(EntityKey::ById(podcast_id)).await? else {
            return Ok(None);
        };
        let episodes = self.repo.get_episodes_for_podcast(podcast_id).await?;
        Ok(Some((podcast, episodes)))
    }
}
