//! Contract checks shared by both repository backends.
//!
//! Each `check_*` function takes a fresh repository and asserts one slice of
//! the contract; the backend test files instantiate them against the
//! in-memory store and the SQLite store so the two cannot drift apart.

// Not every test binary calls every check.
#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use podarr::models::{Author, Category, Playlist, Podcast, User};
use podarr::repository::{CatalogueRepository, EntityKey};

pub fn podcasts_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/podcasts.csv")
}

pub fn episodes_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/episodes.csv")
}

pub async fn populate(repo: &dyn CatalogueRepository) {
    repo.populate(&podcasts_csv(), &episodes_csv())
        .await
        .expect("populate should succeed against the fixture datasets");
}

pub async fn check_author_lookup(repo: &dyn CatalogueRepository) {
    repo.add_author(Author::new(1, "Alpha Media").unwrap())
        .await
        .unwrap();

    let by_id = repo.get_author(EntityKey::ById(1)).await.unwrap().unwrap();
    assert_eq!(by_id.name(), "Alpha Media");

    let by_name = repo
        .get_author(EntityKey::from("Alpha Media"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id(), 1);

    assert!(repo.get_author(EntityKey::ById(99)).await.unwrap().is_none());
    assert!(
        repo.get_author(EntityKey::from("Nobody"))
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn check_category_lookup(repo: &dyn CatalogueRepository) {
    repo.add_category(Category::new(1, "Comedy").unwrap())
        .await
        .unwrap();

    let by_id = repo.get_category(EntityKey::ById(1)).await.unwrap().unwrap();
    assert_eq!(by_id.name(), "Comedy");

    let by_name = repo
        .get_category(EntityKey::from("Comedy"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id(), 1);

    assert!(
        repo.get_category(EntityKey::ById(42))
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn check_podcast_cascades_categories(repo: &dyn CatalogueRepository) {
    let mut podcast = Podcast::new(7, "Side Channel").unwrap();
    podcast.set_author(Some(Author::new(1, "Alpha Media").unwrap()));
    podcast.add_category(Category::new(1, "Science").unwrap());
    podcast.add_category(Category::new(2, "Health").unwrap());

    repo.add_podcast(podcast).await.unwrap();

    let stored = repo.get_podcast(EntityKey::ById(7)).await.unwrap().unwrap();
    assert_eq!(stored.title(), "Side Channel");
    assert_eq!(stored.categories().len(), 2);

    // Adding the podcast must have registered its categories too.
    let categories = repo.get_categories().await.unwrap();
    assert!(categories.iter().any(|c| c.name() == "Science"));
    assert!(categories.iter().any(|c| c.name() == "Health"));

    let by_title = repo
        .get_podcast(EntityKey::from("Side Channel"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_title.id(), 7);

    assert!(repo.get_podcast(EntityKey::ById(404)).await.unwrap().is_none());
}

pub async fn check_user_registration_is_idempotent(repo: &dyn CatalogueRepository) {
    repo.add_user(User::new(1, "Shaun", "hunter2").unwrap())
        .await
        .unwrap();
    // Same username, different password: the original account survives.
    repo.add_user(User::new(2, "shaun", "other").unwrap())
        .await
        .unwrap();

    let users = repo.get_users().await.unwrap();
    assert_eq!(users.len(), 1);

    let stored = repo.get_user("SHAUN").await.unwrap().unwrap();
    assert_eq!(stored.username(), "shaun");
    assert_eq!(stored.password(), "hunter2");

    assert!(repo.get_user("nobody").await.unwrap().is_none());
}

pub async fn check_review_flow(repo: &dyn CatalogueRepository) {
    populate(repo).await;
    repo.add_user(User::new(1, "casey", "pw").unwrap())
        .await
        .unwrap();
    let user = repo.get_user("casey").await.unwrap().unwrap();

    let review = podarr::models::Review::new(
        1,
        user.clone(),
        8,
        "Loved the pilot",
        podarr::models::ReviewTarget::Podcast(2),
    )
    .unwrap();
    repo.save_review(review).await.unwrap();

    let reviews = repo.get_reviews_for_podcast(2).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating(), 8);
    assert_eq!(reviews[0].user().username(), "casey");
    assert_eq!(reviews[0].podcast_id(), Some(2));
    assert_eq!(reviews[0].episode_id(), None);

    assert!(repo.get_reviews_for_podcast(1).await.unwrap().is_empty());
    assert_eq!(repo.get_number_of_reviews().await.unwrap(), 1);
}

pub async fn check_playlist_crud(repo: &dyn CatalogueRepository) {
    populate(repo).await;
    repo.add_user(User::new(1, "alice", "pw").unwrap())
        .await
        .unwrap();
    let alice = repo.get_user("alice").await.unwrap().unwrap();

    let id = repo.next_playlist_id().await.unwrap();
    assert_eq!(id, 1);
    let playlist = Playlist::new(id, "Morning Queue", alice.clone()).unwrap();
    repo.add_playlist(playlist).await.unwrap();

    let second_id = repo.next_playlist_id().await.unwrap();
    assert_eq!(second_id, 2);

    // Queue two episodes and a podcast, then upsert.
    let mut playlist = repo.get_playlist(1).await.unwrap().unwrap();
    let episodes = repo.get_episodes_for_podcast(1).await.unwrap();
    assert_eq!(episodes.len(), 2);
    playlist.add_episode(episodes[0].clone());
    playlist.add_episode(episodes[1].clone());
    let banter = repo.get_podcast(EntityKey::ById(2)).await.unwrap().unwrap();
    playlist.add_podcast(banter);
    repo.save_playlist(playlist).await.unwrap();

    let stored = repo.get_playlist(1).await.unwrap().unwrap();
    assert_eq!(stored.name(), "Morning Queue");
    assert_eq!(stored.owner().username(), "alice");
    assert_eq!(stored.episodes().len(), 2);
    assert_eq!(stored.podcasts().len(), 1);
    assert_eq!(stored.podcasts()[0].id(), 2);

    // Saving under the same id replaces instead of inserting.
    let mut renamed = stored.clone();
    renamed.set_name("Evening Queue").unwrap();
    repo.save_playlist(renamed).await.unwrap();

    let playlists = repo.get_playlists_for_user(&alice).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name(), "Evening Queue");

    assert!(repo.get_playlist(77).await.unwrap().is_none());
}

pub async fn check_populate_builds_catalogue(repo: &dyn CatalogueRepository) {
    populate(repo).await;

    // Five parseable shows; the non-numeric id and the empty title are
    // skipped.
    assert_eq!(repo.get_number_of_podcasts().await.unwrap(), 5);

    // Two shows share "Alpha Media"; the blank author field becomes the
    // sentinel author. Three authors total, interned in first-seen order.
    let authors = repo.get_authors().await.unwrap();
    assert_eq!(authors.len(), 3);
    let alpha = repo
        .get_author(EntityKey::from("Alpha Media"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alpha.id(), 1);
    assert!(
        repo.get_author(EntityKey::from("No Author Listed"))
            .await
            .unwrap()
            .is_some()
    );

    let categories = repo.get_categories().await.unwrap();
    assert_eq!(categories.len(), 5);
    let comedy = repo
        .get_category(EntityKey::from("Comedy"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(comedy.id(), 3);

    // Blank category field yields a podcast with zero categories.
    let quiet = repo.get_podcast(EntityKey::ById(6)).await.unwrap().unwrap();
    assert!(quiet.categories().is_empty());
    assert_eq!(quiet.language(), "French");

    // Sentinel defaults for blank language/website/author fields.
    let nine_to_five = repo.get_podcast(EntityKey::ById(3)).await.unwrap().unwrap();
    assert_eq!(nine_to_five.website(), "No Website Listed");
    let chatterbox = repo.get_podcast(EntityKey::ById(4)).await.unwrap().unwrap();
    assert_eq!(chatterbox.author_name(), "No Author Listed");
    assert_eq!(chatterbox.language(), "No Language Listed");

    // Browse order: alphabetic titles first, non-alphabetic leaders sink.
    let by_name = repo.get_podcasts_by_name().await.unwrap();
    let titles: Vec<&str> = by_name.iter().map(|p| p.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Alpha Waves",
            "Banter Hour",
            "Chatterbox",
            "Quiet Signals",
            "9 to 5 Pod",
        ]
    );

    // Episodes landed under their podcasts; the orphan row (podcast 999)
    // was dropped.
    let alpha_eps = repo.get_episodes_for_podcast(1).await.unwrap();
    assert_eq!(alpha_eps.len(), 2);
    assert_eq!(
        alpha_eps[0].pub_date(),
        NaiveDate::from_ymd_opt(2017, 12, 1).unwrap()
    );
    assert_eq!(
        alpha_eps[0].pub_time(),
        NaiveTime::from_hms_opt(0, 9, 47).unwrap()
    );
    assert!(repo.get_episodes_for_podcast(999).await.unwrap().is_empty());
}

pub async fn check_search(repo: &dyn CatalogueRepository) {
    populate(repo).await;

    let by_title = repo.search_podcasts_by_title("banter").await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id(), 2);

    let mut by_author: Vec<i32> = repo
        .search_podcasts_by_author("alpha media")
        .await
        .unwrap()
        .iter()
        .map(podarr::models::Podcast::id)
        .collect();
    by_author.sort_unstable();
    assert_eq!(by_author, vec![1, 2]);

    // "Comedy" tags two shows; substring terms match too.
    let mut by_category: Vec<i32> = repo
        .search_podcasts_by_category("com")
        .await
        .unwrap()
        .iter()
        .map(podarr::models::Podcast::id)
        .collect();
    by_category.sort_unstable();
    assert_eq!(by_category, vec![2, 3]);

    assert!(
        repo.search_podcasts_by_title("zzz nothing")
            .await
            .unwrap()
            .is_empty()
    );
}
