//! Catalogue persistence: authors, categories, podcasts and their episodes.

use anyhow::Result;
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entities::{authors, categories, episodes, podcast_categories, podcasts, prelude::*};
use crate::ingest::CatalogueData;
use crate::models::{Author, Category, Episode, Podcast};
use crate::repository::{EntityKey, title_sort_key};

use super::episode_to_domain;

pub struct PodcastRepository {
    conn: DatabaseConnection,
}

impl PodcastRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ---- authors ----

    pub async fn add_author(&self, author: &Author) -> Result<()> {
        let txn = self.conn.begin().await?;
        Self::ensure_author(&txn, author).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Inserts the author unless a row with the same name is already
    /// committed, and returns the id of whichever row ends up holding the
    /// name. Name-first matters: `authors.name` is unique, and podcast rows
    /// must reference the surviving id.
    async fn ensure_author<C: ConnectionTrait>(conn: &C, author: &Author) -> Result<i32> {
        let existing = Authors::find()
            .filter(authors::Column::Name.eq(author.name()))
            .one(conn)
            .await?;
        if let Some(row) = existing {
            return Ok(row.id);
        }
        authors::ActiveModel {
            id: Set(author.id()),
            name: Set(author.name().to_string()),
        }
        .insert(conn)
        .await?;
        Ok(author.id())
    }

    pub async fn get_author(&self, key: &EntityKey) -> Result<Option<Author>> {
        let query = match key {
            EntityKey::ById(id) => Authors::find_by_id(*id),
            EntityKey::ByName(name) => Authors::find().filter(authors::Column::Name.eq(name)),
        };
        let model = query.one(&self.conn).await?;
        Ok(match model {
            Some(m) => Some(Author::new(m.id, &m.name)?),
            None => None,
        })
    }

    pub async fn get_authors(&self) -> Result<Vec<Author>> {
        let models = Authors::find()
            .order_by_asc(authors::Column::Id)
            .all(&self.conn)
            .await?;
        models
            .into_iter()
            .map(|m| Author::new(m.id, &m.name).map_err(Into::into))
            .collect()
    }

    // ---- categories ----

    pub async fn add_category(&self, category: &Category) -> Result<()> {
        let txn = self.conn.begin().await?;
        Self::ensure_category(&txn, category).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Same name-first dedup as [`Self::ensure_author`]; category links must
    /// point at the surviving row.
    async fn ensure_category<C: ConnectionTrait>(conn: &C, category: &Category) -> Result<i32> {
        let existing = Categories::find()
            .filter(categories::Column::Name.eq(category.name()))
            .one(conn)
            .await?;
        if let Some(row) = existing {
            return Ok(row.id);
        }
        categories::ActiveModel {
            id: Set(category.id()),
            name: Set(category.name().to_string()),
        }
        .insert(conn)
        .await?;
        Ok(category.id())
    }

    pub async fn get_category(&self, key: &EntityKey) -> Result<Option<Category>> {
        let query = match key {
            EntityKey::ById(id) => Categories::find_by_id(*id),
            EntityKey::ByName(name) => {
                Categories::find().filter(categories::Column::Name.eq(name))
            }
        };
        let model = query.one(&self.conn).await?;
        Ok(match model {
            Some(m) => Some(Category::new(m.id, &m.name)?),
            None => None,
        })
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        let models = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await?;
        models
            .into_iter()
            .map(|m| Category::new(m.id, &m.name).map_err(Into::into))
            .collect()
    }

    // ---- podcasts ----

    pub async fn add(&self, podcast: &Podcast) -> Result<()> {
        let txn = self.conn.begin().await?;
        Self::insert_podcast(&txn, podcast).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Writes the podcast row plus its author, categories and category
    /// links, so the stored category set stays a superset of everything any
    /// podcast references.
    async fn insert_podcast<C: ConnectionTrait>(conn: &C, podcast: &Podcast) -> Result<()> {
        let author_id = match podcast.author() {
            Some(author) => Some(Self::ensure_author(conn, author).await?),
            None => None,
        };

        let active = podcasts::ActiveModel {
            id: Set(podcast.id()),
            title: Set(podcast.title().to_string()),
            image_url: Set(podcast.image().map(str::to_string)),
            description: Set(Some(podcast.description().to_string())),
            language: Set(Some(podcast.language().to_string())),
            website_url: Set(Some(podcast.website().to_string())),
            author_id: Set(author_id),
            itunes_id: Set(podcast.itunes_id()),
        };
        Podcasts::insert(active)
            .on_conflict(
                OnConflict::column(podcasts::Column::Id)
                    .update_columns([
                        podcasts::Column::Title,
                        podcasts::Column::ImageUrl,
                        podcasts::Column::Description,
                        podcasts::Column::Language,
                        podcasts::Column::WebsiteUrl,
                        podcasts::Column::AuthorId,
                        podcasts::Column::ItunesId,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        for category in podcast.categories() {
            let category_id = Self::ensure_category(conn, category).await?;
            PodcastCategories::insert(podcast_categories::ActiveModel {
                podcast_id: Set(podcast.id()),
                category_id: Set(category_id),
            })
            .on_conflict(
                OnConflict::columns([
                    podcast_categories::Column::PodcastId,
                    podcast_categories::Column::CategoryId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        }

        Ok(())
    }

    pub async fn get(&self, key: &EntityKey) -> Result<Option<Podcast>> {
        let query = match key {
            EntityKey::ById(id) => Podcasts::find_by_id(*id),
            EntityKey::ByName(title) => Podcasts::find().filter(podcasts::Column::Title.eq(title)),
        };
        let models = query.all(&self.conn).await?;
        Ok(self.hydrate(models).await?.into_iter().next())
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Podcast>> {
        let models = Podcasts::find()
            .filter(podcasts::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(podcasts::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(models).await
    }

    pub async fn list(&self) -> Result<Vec<Podcast>> {
        let models = Podcasts::find()
            .order_by_asc(podcasts::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(models).await
    }

    pub async fn list_by_name(&self) -> Result<Vec<Podcast>> {
        let mut podcasts = self.list().await?;
        podcasts.sort_by_key(|p| title_sort_key(p.title()));
        Ok(podcasts)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Podcasts::find().count(&self.conn).await?)
    }

    /// Turns podcast rows into domain objects, pulling authors, categories
    /// and episodes in one loader pass each instead of per row.
    async fn hydrate(&self, models: Vec<podcasts::Model>) -> Result<Vec<Podcast>> {
        let authors = models.load_one(Authors, &self.conn).await?;
        let categories = models
            .load_many_to_many(Categories, PodcastCategories, &self.conn)
            .await?;
        let episodes = models.load_many(Episodes, &self.conn).await?;

        let mut out = Vec::with_capacity(models.len());
        for (((model, author), category_models), episode_models) in models
            .into_iter()
            .zip(authors)
            .zip(categories)
            .zip(episodes)
        {
            out.push(Self::to_domain(
                model,
                author,
                category_models,
                episode_models,
            )?);
        }
        Ok(out)
    }

    fn to_domain(
        model: podcasts::Model,
        author: Option<authors::Model>,
        category_models: Vec<categories::Model>,
        episode_models: Vec<episodes::Model>,
    ) -> Result<Podcast> {
        let mut podcast = Podcast::new(model.id, &model.title)?;
        if let Some(a) = author {
            podcast.set_author(Some(Author::new(a.id, &a.name)?));
        }
        podcast.set_image(model.image_url);
        podcast.set_description(model.description.as_deref().unwrap_or_default());
        if let Some(language) = model.language.as_deref() {
            podcast.set_language(language);
        }
        if let Some(website) = model.website_url.as_deref()
            && !website.trim().is_empty()
        {
            podcast.set_website(website)?;
        }
        podcast.set_itunes_id(model.itunes_id);

        for c in category_models {
            podcast.add_category(Category::new(c.id, &c.name)?);
        }
        for e in episode_models {
            podcast.add_episode(episode_to_domain(e)?);
        }
        Ok(podcast)
    }

    // ---- episodes ----

    pub async fn episodes_for_podcast(&self, podcast_id: i32) -> Result<Vec<Episode>> {
        let models = Episodes::find()
            .filter(episodes::Column::PodcastId.eq(podcast_id))
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await?;
        models
            .into_iter()
            .map(|m| episode_to_domain(m).map_err(Into::into))
            .collect()
    }

    // ---- search ----

    pub async fn search_by_title(&self, term: &str) -> Result<Vec<Podcast>> {
        let models = Podcasts::find()
            .filter(Self::lower_like(
                Expr::col((podcasts::Entity, podcasts::Column::Title)),
                term,
            ))
            .order_by_asc(podcasts::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(models).await
    }

    pub async fn search_by_author(&self, term: &str) -> Result<Vec<Podcast>> {
        let models = Podcasts::find()
            .join(JoinType::InnerJoin, podcasts::Relation::Authors.def())
            .filter(Self::lower_like(
                Expr::col((authors::Entity, authors::Column::Name)),
                term,
            ))
            .order_by_asc(podcasts::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(models).await
    }

    pub async fn search_by_category(&self, term: &str) -> Result<Vec<Podcast>> {
        let models = Podcasts::find()
            .join(
                JoinType::InnerJoin,
                podcasts::Relation::PodcastCategories.def(),
            )
            .join(
                JoinType::InnerJoin,
                podcast_categories::Relation::Categories.def(),
            )
            .filter(Self::lower_like(
                Expr::col((categories::Entity, categories::Column::Name)),
                term,
            ))
            .distinct()
            .order_by_asc(podcasts::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(models).await
    }

    fn lower_like(column: Expr, term: &str) -> SimpleExpr {
        let pattern = format!("%{}%", term.trim().to_lowercase());
        Expr::expr(Func::lower(column)).like(pattern)
    }

    // ---- bulk load ----

    /// Loads an import pass in dependency order, one transaction per entity
    /// kind. Re-running over the same data is a no-op: authors and
    /// categories dedup by name, podcasts upsert, episodes skip conflicts.
    pub async fn load(&self, data: CatalogueData) -> Result<()> {
        let txn = self.conn.begin().await?;
        for author in &data.authors {
            Self::ensure_author(&txn, author).await?;
        }
        txn.commit().await?;

        let txn = self.conn.begin().await?;
        for category in &data.categories {
            Self::ensure_category(&txn, category).await?;
        }
        txn.commit().await?;

        let txn = self.conn.begin().await?;
        for podcast in &data.podcasts {
            Self::insert_podcast(&txn, podcast).await?;
        }
        txn.commit().await?;

        let txn = self.conn.begin().await?;
        let episode_models: Vec<episodes::ActiveModel> = data
            .episodes
            .iter()
            .map(|e| episodes::ActiveModel {
                id: Set(e.id()),
                podcast_id: Set(e.podcast_id()),
                title: Set(e.title().to_string()),
                audio_url: Set(Some(e.audio().to_string())),
                audio_len: Set(e.audio_len()),
                description: Set(Some(e.description().to_string())),
                pub_date: Set(e.pub_date()),
                pub_time: Set(e.pub_time()),
            })
            .collect();
        // Chunked to stay under SQLite's bind-variable ceiling.
        for chunk in episode_models.chunks(100) {
            Episodes::insert_many(chunk.to_vec())
                .on_conflict(
                    OnConflict::column(episodes::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;

        info!(
            podcasts = data.podcasts.len(),
            episodes = data.episodes.len(),
            "catalogue loaded into database"
        );
        Ok(())
    }
}
