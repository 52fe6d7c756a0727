//! Behavior of the CSV importer in isolation from any repository.

use std::path::PathBuf;

use podarr::ingest::{self, NO_AUTHOR, NO_LANGUAGE, NO_WEBSITE};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn load() -> ingest::CatalogueData {
    ingest::read_catalogue(&fixture("podcasts.csv"), &fixture("episodes.csv"))
        .expect("fixture datasets should load")
}

#[test]
fn authors_are_interned_across_rows() {
    let data = load();

    // "Alpha Media" appears on two shows but exists once, and both shows
    // reference that one identity.
    assert_eq!(data.authors.len(), 3);
    let alpha = data
        .authors
        .iter()
        .find(|a| a.name() == "Alpha Media")
        .unwrap();
    assert_eq!(alpha.id(), 1);

    let alpha_shows: Vec<i32> = data
        .podcasts
        .iter()
        .filter(|p| p.author().is_some_and(|a| a.name() == "Alpha Media"))
        .map(podarr::models::Podcast::id)
        .collect();
    assert_eq!(alpha_shows, vec![1, 2]);
    assert_eq!(alpha.podcast_ids(), &[1, 2]);
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let data = load();

    // "abc" id and the empty-title row both fall out; five shows remain.
    assert_eq!(data.podcasts.len(), 5);
    assert!(data.podcasts.iter().all(|p| p.title() != "Broken Row"));
    // Authors from skipped rows are never interned.
    assert!(data.authors.iter().all(|a| a.name() != "Junk Author"));
    assert!(data.authors.iter().all(|a| a.name() != "Gamma Group"));
}

#[test]
fn blank_fields_get_sentinels() {
    let data = load();

    let chatterbox = data.podcasts.iter().find(|p| p.id() == 4).unwrap();
    assert_eq!(chatterbox.author_name(), NO_AUTHOR);
    assert_eq!(chatterbox.language(), NO_LANGUAGE);

    let nine_to_five = data.podcasts.iter().find(|p| p.id() == 3).unwrap();
    assert_eq!(nine_to_five.website(), NO_WEBSITE);
    assert_eq!(nine_to_five.language(), "English");
}

#[test]
fn empty_category_field_means_no_categories() {
    let data = load();
    let quiet = data.podcasts.iter().find(|p| p.id() == 6).unwrap();
    assert!(quiet.categories().is_empty());
}

#[test]
fn categories_are_interned_with_sequential_ids() {
    let data = load();
    let names: Vec<&str> = data.categories.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["Science", "Health", "Comedy", "Business", "Society"]
    );
    let ids: Vec<i32> = data
        .categories
        .iter()
        .map(podarr::models::Category::id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn episodes_link_to_their_podcasts_and_orphans_drop() {
    let data = load();

    // Six rows, one referencing podcast 999 which does not exist.
    assert_eq!(data.episodes.len(), 5);

    let alpha = data.podcasts.iter().find(|p| p.id() == 1).unwrap();
    assert_eq!(alpha.episodes().len(), 2);

    let banter = data.podcasts.iter().find(|p| p.id() == 2).unwrap();
    let banter_eps: Vec<i32> = banter
        .episodes()
        .iter()
        .map(podarr::models::Episode::id)
        .collect();
    assert_eq!(banter_eps, vec![3, 6]);
}

#[test]
fn missing_source_file_is_fatal() {
    let err = ingest::read_catalogue(&fixture("nope.csv"), &fixture("episodes.csv")).unwrap_err();
    assert!(err.to_string().contains("podcasts dataset"));

    let err = ingest::read_catalogue(&fixture("podcasts.csv"), &fixture("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("episodes dataset"));
}
