//! Search dispatch over the repository's three search helpers.

use std::sync::Arc;

use thiserror::Error;

use crate::models::Podcast;
use crate::repository::CatalogueRepository;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Category,
}

impl SearchField {
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim().to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

pub struct SearchService {
    repo: Arc<dyn CatalogueRepository>,
}

impl SearchService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogueRepository>) -> Self {
        Self { repo }
    }

    /// A blank term matches nothing rather than everything.
    pub async fn search(&self, field: SearchField, term: &str) -> Result<Vec<Podcast>, SearchError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        let results = match field {
            SearchField::Title => self.repo.search_podcasts_by_title(term).await?,
            SearchField::Author => self.repo.search_podcasts_by_author(term).await?,
            SearchField::Category => self.repo.search_podcasts_by_category(term).await?,
        };
        Ok(results)
    }
}
