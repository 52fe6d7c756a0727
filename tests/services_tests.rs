//! Application services over the in-memory backend.

mod common;

use std::sync::Arc;

use podarr::repository::CatalogueRepository;
use podarr::repository::memory::MemoryRepository;
use podarr::services::{
    AuthError, AuthService, CatalogueService, PlaylistService, ReviewService, SearchField,
    SearchService,
};

fn repo() -> Arc<MemoryRepository> {
    Arc::new(MemoryRepository::new())
}

#[tokio::test]
async fn register_twice_keeps_the_first_account() {
    let repo = repo();
    let auth = AuthService::new(repo.clone());

    auth.register("x", "pw1").await.unwrap();
    auth.register("x", "pw2").await.unwrap();

    let users = repo.get_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].password(), "pw1");

    assert!(auth.authenticate("x", "pw1").await.is_ok());
    assert!(matches!(
        auth.authenticate("x", "pw2").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.authenticate("ghost", "pw").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn registration_assigns_sequential_user_ids() {
    let repo = repo();
    let auth = AuthService::new(repo.clone());

    auth.register("first", "pw").await.unwrap();
    auth.register("second", "pw").await.unwrap();

    let users = repo.get_users().await.unwrap();
    let ids: Vec<i32> = users.iter().map(podarr::models::User::id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn blank_username_is_a_validation_error() {
    let auth = AuthService::new(repo());
    assert!(matches!(
        auth.register("   ", "pw").await,
        Err(AuthError::Validation(_))
    ));
}

#[tokio::test]
async fn browse_pages_clamp_and_slice() {
    let repo = repo();
    common::populate(repo.as_ref()).await;
    let catalogue = CatalogueService::new(repo);

    let page = catalogue.browse(1, 2).await.unwrap();
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title(), "Alpha Waves");

    // The sink rule puts the digit-led title on the last page.
    let last = catalogue.browse(99, 2).await.unwrap();
    assert_eq!(last.page, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].title(), "9 to 5 Pod");
}

#[tokio::test]
async fn podcast_details_bundle_episodes() {
    let repo = repo();
    common::populate(repo.as_ref()).await;
    let catalogue = CatalogueService::new(repo);

    let (podcast, episodes) = catalogue.podcast_details(1).await.unwrap().unwrap();
    assert_eq!(podcast.title(), "Alpha Waves");
    assert_eq!(episodes.len(), 2);

    assert!(catalogue.podcast_details(404).await.unwrap().is_none());
}

#[tokio::test]
async fn review_ids_follow_the_review_count() {
    let repo = repo();
    common::populate(repo.as_ref()).await;
    let auth = AuthService::new(repo.clone());
    auth.register("casey", "pw").await.unwrap();
    let casey = auth.get_user("casey").await.unwrap().unwrap();

    let reviews = ReviewService::new(repo.clone());
    let first = reviews.review_podcast(&casey, 1, 7, "solid").await.unwrap();
    let second = reviews.review_podcast(&casey, 1, 9, "grew on me").await.unwrap();
    assert_eq!(first.id(), 1);
    assert_eq!(second.id(), 2);

    let stored = reviews.reviews_for_podcast(1).await.unwrap();
    assert_eq!(stored.len(), 2);

    // Out-of-range ratings never reach the repository.
    assert!(reviews.review_podcast(&casey, 1, 11, "nope").await.is_err());
    assert_eq!(repo.get_number_of_reviews().await.unwrap(), 2);
}

#[tokio::test]
async fn playlist_service_builds_on_repository_ids() {
    let repo = repo();
    common::populate(repo.as_ref()).await;
    let auth = AuthService::new(repo.clone());
    auth.register("alice", "pw").await.unwrap();
    let alice = auth.get_user("alice").await.unwrap().unwrap();

    let playlists = PlaylistService::new(repo.clone());
    let first = playlists.create(&alice, "Morning").await.unwrap();
    let second = playlists.create(&alice, "Evening").await.unwrap();
    assert_eq!(first.id(), 1);
    assert_eq!(second.id(), 2);

    let episodes = repo.get_episodes_for_podcast(1).await.unwrap();
    let updated = playlists
        .add_episode(first.id(), episodes[0].clone())
        .await
        .unwrap();
    assert_eq!(updated.episodes().len(), 1);

    let mine = playlists.playlists_for(&alice).await.unwrap();
    assert_eq!(mine.len(), 2);

    let trimmed = playlists
        .remove_episode(first.id(), &episodes[0])
        .await
        .unwrap();
    assert!(trimmed.episodes().is_empty());
}

#[tokio::test]
async fn search_dispatches_by_field() {
    let repo = repo();
    common::populate(repo.as_ref()).await;
    let search = SearchService::new(repo);

    assert_eq!(SearchField::parse("Category"), Some(SearchField::Category));
    assert_eq!(SearchField::parse("banana"), None);

    let hits = search.search(SearchField::Title, "banter").await.unwrap();
    assert_eq!(hits.len(), 1);

    let none = search.search(SearchField::Author, "   ").await.unwrap();
    assert!(none.is_empty());
}
