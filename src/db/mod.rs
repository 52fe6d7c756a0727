//! Durable SQLite backend behind the same contract as the in-memory store.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

pub mod migrator;
pub mod repositories;

use crate::ingest;
use crate::models::{Author, Category, Episode, Playlist, Podcast, Review, User};
use crate::repository::{CatalogueRepository, EntityKey};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn podcast_repo(&self) -> repositories::podcast::PodcastRepository {
        repositories::podcast::PodcastRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn playlist_repo(&self) -> repositories::playlist::PlaylistRepository {
        repositories::playlist::PlaylistRepository::new(self.conn.clone())
    }
}

#[async_trait]
impl CatalogueRepository for Store {
    async fn add_author(&self, author: Author) -> Result<()> {
        self.podcast_repo().add_author(&author).await
    }

    async fn get_author(&self, key: EntityKey) -> Result<Option<Author>> {
        self.podcast_repo().get_author(&key).await
    }

    async fn get_authors(&self) -> Result<Vec<Author>> {
        self.podcast_repo().get_authors().await
    }

    async fn add_podcast(&self, podcast: Podcast) -> Result<()> {
        self.podcast_repo().add(&podcast).await
    }

    async fn get_podcast(&self, key: EntityKey) -> Result<Option<Podcast>> {
        self.podcast_repo().get(&key).await
    }

    async fn get_podcasts(&self) -> Result<Vec<Podcast>> {
        self.podcast_repo().list().await
    }

    async fn get_podcasts_by_name(&self) -> Result<Vec<Podcast>> {
        self.podcast_repo().list_by_name().await
    }

    async fn get_number_of_podcasts(&self) -> Result<u64> {
        self.podcast_repo().count().await
    }

    async fn add_category(&self, category: Category) -> Result<()> {
        self.podcast_repo().add_category(&category).await
    }

    async fn get_category(&self, key: EntityKey) -> Result<Option<Category>> {
        self.podcast_repo().get_category(&key).await
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        self.podcast_repo().get_categories().await
    }

    async fn get_episodes_for_podcast(&self, podcast_id: i32) -> Result<Vec<Episode>> {
        self.podcast_repo().episodes_for_podcast(podcast_id).await
    }

    async fn add_user(&self, user: User) -> Result<()> {
        self.user_repo().add(&user).await
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    async fn save_review(&self, review: Review) -> Result<()> {
        self.review_repo().save(&review).await
    }

    async fn get_reviews_for_podcast(&self, podcast_id: i32) -> Result<Vec<Review>> {
        self.review_repo().get_for_podcast(podcast_id).await
    }

    async fn get_number_of_reviews(&self) -> Result<u64> {
        self.review_repo().count().await
    }

    async fn add_playlist(&self, playlist: Playlist) -> Result<()> {
        self.playlist_repo().add(&playlist).await
    }

    async fn get_playlist(&self, playlist_id: i32) -> Result<Option<Playlist>> {
        self.playlist_repo().get(playlist_id).await
    }

    async fn get_playlists_for_user(&self, user: &User) -> Result<Vec<Playlist>> {
        self.playlist_repo().list_for_user(user.id()).await
    }

    async fn next_playlist_id(&self) -> Result<i32> {
        self.playlist_repo().next_id().await
    }

    async fn save_playlist(&self, playlist: Playlist) -> Result<()> {
        self.playlist_repo().save(&playlist).await
    }

    async fn search_podcasts_by_title(&self, term: &str) -> Result<Vec<Podcast>> {
        self.podcast_repo().search_by_title(term).await
    }

    async fn search_podcasts_by_author(&self, term: &str) -> Result<Vec<Podcast>> {
        self.podcast_repo().search_by_author(term).await
    }

    async fn search_podcasts_by_category(&self, term: &str) -> Result<Vec<Podcast>> {
        self.podcast_repo().search_by_category(term).await
    }

    async fn populate(&self, podcasts_csv: &Path, episodes_csv: &Path) -> Result<()> {
        let data = ingest::read_catalogue(podcasts_csv, episodes_csv)?;
        self.podcast_repo().load(data).await
    }
}
