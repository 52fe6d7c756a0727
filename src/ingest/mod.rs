//! Bulk loader for the two related CSV datasets (shows and episodes).
//!
//! Produces a fully linked object graph ready for a repository to store.
//! Authors and categories are interned by name, so repeated source rows
//! referencing the same name resolve to one entity with one id.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{Author, Category, DomainError, Episode, Podcast};

/// Stand-in author for shows whose source row leaves the author blank.
pub const NO_AUTHOR: &str = "No Author Listed";
/// Stand-in language for shows whose source row leaves the language blank.
pub const NO_LANGUAGE: &str = "No Language Listed";
/// Stand-in website for shows whose source row leaves the website blank.
pub const NO_WEBSITE: &str = "No Website Listed";

#[derive(Debug, Deserialize)]
struct PodcastRow {
    id: String,
    title: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    categories: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    itunes_id: String,
}

#[derive(Debug, Deserialize)]
struct EpisodeRow {
    id: String,
    podcast_id: String,
    title: String,
    #[serde(default)]
    audio: String,
    #[serde(default)]
    audio_length: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    pub_date: String,
}

/// Everything one import pass yields, in dependency order for loading:
/// authors and categories first, then podcasts, then episodes.
#[derive(Debug, Default)]
pub struct CatalogueData {
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
    pub podcasts: Vec<Podcast>,
    pub episodes: Vec<Episode>,
}

/// Interns entities by trimmed name, assigning sequential ids from 1 in
/// first-seen order.
#[derive(Debug, Default)]
struct NameIndex {
    by_name: HashMap<String, usize>,
}

impl NameIndex {
    fn intern<T>(
        &mut self,
        name: &str,
        items: &mut Vec<T>,
        build: impl FnOnce(i32, &str) -> Result<T, DomainError>,
    ) -> Result<T, DomainError>
    where
        T: Clone,
    {
        let name = name.trim();
        if let Some(&idx) = self.by_name.get(name) {
            return Ok(items[idx].clone());
        }
        let next_id = i32::try_from(items.len() + 1).unwrap_or(i32::MAX);
        let item = build(next_id, name)?;
        self.by_name.insert(name.to_string(), items.len());
        items.push(item.clone());
        Ok(item)
    }
}

pub fn read_catalogue(podcasts_csv: &Path, episodes_csv: &Path) -> Result<CatalogueData> {
    let mut data = load_podcasts(podcasts_csv)?;
    load_episodes(episodes_csv, &mut data)?;
    info!(
        podcasts = data.podcasts.len(),
        episodes = data.episodes.len(),
        authors = data.authors.len(),
        categories = data.categories.len(),
        "catalogue data loaded"
    );
    Ok(data)
}

fn load_podcasts(path: &Path) -> Result<CatalogueData> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open podcasts dataset at {}", path.display()))?;

    let mut data = CatalogueData::default();
    let mut authors = NameIndex::default();
    let mut categories = NameIndex::default();

    for (line, record) in reader.deserialize::<PodcastRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                warn!("skipping unreadable podcast row {}: {}", line + 2, err);
                continue;
            }
        };

        let Ok(id) = row.id.trim().parse::<i32>() else {
            warn!("skipping podcast row with non-numeric id {:?}", row.id);
            continue;
        };

        match podcast_from_row(id, &row, &mut data, &mut authors, &mut categories) {
            Ok(podcast) => data.podcasts.push(podcast),
            Err(err) => warn!("skipping podcast {}: {}", id, err),
        }
    }

    Ok(data)
}

fn podcast_from_row(
    id: i32,
    row: &PodcastRow,
    data: &mut CatalogueData,
    authors: &mut NameIndex,
    categories: &mut NameIndex,
) -> Result<Podcast, DomainError> {
    let mut podcast = Podcast::new(id, &row.title)?;

    let author_name = if row.author.trim().is_empty() {
        NO_AUTHOR
    } else {
        row.author.trim()
    };
    let author = authors.intern(author_name, &mut data.authors, Author::new)?;
    if let Some(idx) = data.authors.iter().position(|a| a == &author) {
        data.authors[idx].add_podcast(id);
    }
    podcast.set_author(Some(author));

    podcast.set_description(&row.description);
    if !row.image.trim().is_empty() {
        podcast.set_image(Some(row.image.trim().to_string()));
    }
    if row.language.trim().is_empty() {
        podcast.set_language(NO_LANGUAGE);
    } else {
        podcast.set_language(row.language.trim());
    }
    if row.website.trim().is_empty() {
        podcast.set_website(NO_WEBSITE)?;
    } else {
        podcast.set_website(row.website.trim())?;
    }
    podcast.set_itunes_id(row.itunes_id.trim().parse::<i64>().ok());

    for name in row.categories.split('|') {
        if name.trim().is_empty() {
            continue;
        }
        let category = categories.intern(name, &mut data.categories, Category::new)?;
        podcast.add_category(category);
    }

    Ok(podcast)
}

fn load_episodes(path: &Path, data: &mut CatalogueData) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open episodes dataset at {}", path.display()))?;

    let podcast_index: HashMap<i32, usize> = data
        .podcasts
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id(), idx))
        .collect();

    for (line, record) in reader.deserialize::<EpisodeRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                warn!("skipping unreadable episode row {}: {}", line + 2, err);
                continue;
            }
        };

        let (Ok(id), Ok(podcast_id)) = (
            row.id.trim().parse::<i32>(),
            row.podcast_id.trim().parse::<i32>(),
        ) else {
            warn!("skipping episode row {} with non-numeric ids", line + 2);
            continue;
        };

        // Dangling podcast references are expected in the source data and
        // dropped without comment.
        let Some(&idx) = podcast_index.get(&podcast_id) else {
            continue;
        };

        let Ok(audio_len) = row.audio_length.trim().parse::<i32>() else {
            warn!("skipping episode {} with non-numeric audio length", id);
            continue;
        };

        let (pub_date, pub_time) = match split_publish_stamp(&row.pub_date) {
            Ok(parts) => parts,
            Err(err) => {
                warn!("skipping episode {} with bad publish stamp: {}", id, err);
                continue;
            }
        };

        let episode = match Episode::new(
            id,
            podcast_id,
            &row.title,
            &row.audio,
            audio_len,
            &row.description,
            pub_date,
            pub_time,
        ) {
            Ok(episode) => episode,
            Err(err) => {
                warn!("skipping episode {}: {}", id, err);
                continue;
            }
        };

        data.podcasts[idx].add_episode(episode.clone());
        data.episodes.push(episode);
    }

    Ok(())
}

/// Parses the combined `date time offset` stamp and splits it in two.
///
/// The dataset writes offsets as bare hours ("+00"); appending ":00"
/// completes them for strict parsing.
fn split_publish_stamp(raw: &str) -> Result<(NaiveDate, NaiveTime), chrono::ParseError> {
    let stamped = format!("{}:00", raw.trim());
    let parsed = DateTime::parse_from_str(&stamped, "%Y-%m-%d %H:%M:%S%:z")?;
    Ok((parsed.date_naive(), parsed.time()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_stamp_splits_into_date_and_time() {
        let (date, time) = split_publish_stamp("2017-12-01 00:09:47+00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 12, 1).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(0, 9, 47).unwrap());
    }

    #[test]
    fn publish_stamp_honours_nonzero_offsets() {
        let (date, time) = split_publish_stamp("2018-01-02 03:04:05+13").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2018, 1, 2).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(3, 4, 5).unwrap());
    }

    #[test]
    fn garbage_publish_stamp_is_an_error() {
        assert!(split_publish_stamp("last tuesday").is_err());
    }
}
