//! Contract suite instantiated against the SQLite backend, plus the
//! persistence-only behaviors (idempotent re-population, rollback).

mod common;

use podarr::db::Store;
use podarr::models::{Playlist, User};
use podarr::repository::CatalogueRepository;

/// A single pooled connection keeps the whole test on one `:memory:`
/// database.
async fn fresh_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("in-memory store should connect and migrate")
}

#[tokio::test]
async fn author_lookup() {
    common::check_author_lookup(&fresh_store().await).await;
}

#[tokio::test]
async fn category_lookup() {
    common::check_category_lookup(&fresh_store().await).await;
}

#[tokio::test]
async fn podcast_cascades_categories() {
    common::check_podcast_cascades_categories(&fresh_store().await).await;
}

#[tokio::test]
async fn user_registration_is_idempotent() {
    common::check_user_registration_is_idempotent(&fresh_store().await).await;
}

#[tokio::test]
async fn review_flow() {
    common::check_review_flow(&fresh_store().await).await;
}

#[tokio::test]
async fn playlist_crud() {
    common::check_playlist_crud(&fresh_store().await).await;
}

#[tokio::test]
async fn populate_builds_catalogue() {
    common::check_populate_builds_catalogue(&fresh_store().await).await;
}

#[tokio::test]
async fn search() {
    common::check_search(&fresh_store().await).await;
}

#[tokio::test]
async fn store_connects_and_pings() {
    let store = fresh_store().await;
    store.ping().await.unwrap();
}

#[tokio::test]
async fn repopulating_is_a_no_op() {
    let store = fresh_store().await;
    common::populate(&store).await;
    common::populate(&store).await;

    assert_eq!(store.get_number_of_podcasts().await.unwrap(), 5);
    assert_eq!(store.get_authors().await.unwrap().len(), 3);
    assert_eq!(store.get_categories().await.unwrap().len(), 5);
    assert_eq!(store.get_episodes_for_podcast(1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn next_playlist_id_is_recomputed_from_storage() {
    let store = fresh_store().await;
    store
        .add_user(User::new(1, "alice", "pw").unwrap())
        .await
        .unwrap();
    let alice = store.get_user("alice").await.unwrap().unwrap();

    assert_eq!(store.next_playlist_id().await.unwrap(), 1);

    store
        .add_playlist(Playlist::new(40, "Sparse", alice).unwrap())
        .await
        .unwrap();
    // Gap-tolerant: one past the highest stored id, not the row count.
    assert_eq!(store.next_playlist_id().await.unwrap(), 41);
}

#[tokio::test]
async fn failed_playlist_write_rolls_back_completely() {
    let store = fresh_store().await;
    store
        .add_user(User::new(1, "alice", "pw").unwrap())
        .await
        .unwrap();
    let alice = store.get_user("alice").await.unwrap().unwrap();

    // The episode link references an episode row that does not exist, so
    // the insert inside the transaction must fail...
    let mut playlist = Playlist::new(1, "Doomed", alice).unwrap();
    let ghost = podarr::models::Episode::new(
        900,
        900,
        "Ghost",
        "http://audio.example/ghost.mp3",
        60,
        "never stored",
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    )
    .unwrap();
    playlist.add_episode(ghost);

    assert!(store.add_playlist(playlist).await.is_err());

    // ...and the playlist row inserted earlier in the same transaction must
    // be gone with it.
    assert!(store.get_playlist(1).await.unwrap().is_none());
}
