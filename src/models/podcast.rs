use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{DomainError, Episode, validate_id, validate_non_empty};

/// Language recorded for podcasts whose source row carries no language at all.
pub const UNSPECIFIED_LANGUAGE: &str = "Unspecified";

#[derive(Debug, Clone)]
pub struct Author {
    id: i32,
    name: String,
    podcast_ids: Vec<i32>,
}

impl Author {
    pub fn new(id: i32, name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: validate_id(id)?,
            name: validate_non_empty(name, "author name")?,
            podcast_ids: Vec::new(),
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = validate_non_empty(name, "author name")?;
        Ok(())
    }

    /// Display-only back-references; the repository owns the real link.
    pub fn podcast_ids(&self) -> &[i32] {
        &self.podcast_ids
    }

    pub fn add_podcast(&mut self, podcast_id: i32) {
        if !self.podcast_ids.contains(&podcast_id) {
            self.podcast_ids.push(podcast_id);
        }
    }

    pub fn remove_podcast(&mut self, podcast_id: i32) {
        self.podcast_ids.retain(|id| *id != podcast_id);
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    id: i32,
    name: String,
}

impl Category {
    pub fn new(id: i32, name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: validate_id(id)?,
            name: validate_non_empty(name, "category name")?,
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = validate_non_empty(name, "category name")?;
        Ok(())
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A show in the catalogue. Identity is the id alone: two podcasts with the
/// same id collide no matter how their titles differ, which is what keeps
/// malformed source data from forking into duplicate entries.
#[derive(Debug, Clone)]
pub struct Podcast {
    id: i32,
    title: String,
    author: Option<Author>,
    image: Option<String>,
    description: String,
    language: String,
    website: String,
    itunes_id: Option<i64>,
    categories: Vec<Category>,
    episodes: Vec<Episode>,
}

impl Podcast {
    pub fn new(id: i32, title: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: validate_id(id)?,
            title: validate_non_empty(title, "podcast title")?,
            author: None,
            image: None,
            description: String::new(),
            language: UNSPECIFIED_LANGUAGE.to_string(),
            website: String::new(),
            itunes_id: None,
            categories: Vec::new(),
            episodes: Vec::new(),
        })
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = validate_non_empty(title, "podcast title")?;
        Ok(())
    }

    pub const fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn author_name(&self) -> &str {
        self.author.as_ref().map_or("No Author Listed", Author::name)
    }

    pub fn set_author(&mut self, author: Option<Author>) {
        self.author = author;
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn set_website(&mut self, website: &str) -> Result<(), DomainError> {
        self.website = validate_non_empty(website, "podcast website")?;
        Ok(())
    }

    pub const fn itunes_id(&self) -> Option<i64> {
        self.itunes_id
    }

    pub fn set_itunes_id(&mut self, itunes_id: Option<i64>) {
        self.itunes_id = itunes_id;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_category(&mut self, category: Category) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    pub fn remove_category(&mut self, category: &Category) {
        self.categories.retain(|c| c != category);
    }

    /// Pipe-joined category names, the way the catalogue pages render them.
    pub fn category_line(&self) -> String {
        self.categories
            .iter()
            .map(Category::name)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn add_episode(&mut self, episode: Episode) {
        if !self.episodes.contains(&episode) {
            self.episodes.push(episode);
        }
    }

    pub fn remove_episode(&mut self, episode: &Episode) {
        self.episodes.retain(|e| e != episode);
    }
}

impl PartialEq for Podcast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Podcast {}

impl Hash for Podcast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Podcast {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Podcast {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Podcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Podcast {}: '{}' by {}>", self.id, self.title, self.author_name())
    }
}
