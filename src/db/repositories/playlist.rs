use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::entities::{episodes, playlist_episodes, playlist_podcasts, playlists, prelude::*};
use crate::models::Playlist;

use super::{episode_to_domain, podcast::PodcastRepository, user_to_domain};

pub struct PlaylistRepository {
    conn: DatabaseConnection,
}

impl PlaylistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, playlist: &Playlist) -> Result<()> {
        let txn = self.conn.begin().await?;

        playlists::ActiveModel {
            id: Set(playlist.id()),
            name: Set(playlist.name().to_string()),
            user_id: Set(playlist.owner().id()),
        }
        .insert(&txn)
        .await?;
        Self::insert_links(&txn, playlist).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Upsert: replaces the playlist row and rewrites both association
    /// tables inside one transaction.
    pub async fn save(&self, playlist: &Playlist) -> Result<()> {
        let txn = self.conn.begin().await?;

        Playlists::insert(playlists::ActiveModel {
            id: Set(playlist.id()),
            name: Set(playlist.name().to_string()),
            user_id: Set(playlist.owner().id()),
        })
        .on_conflict(
            OnConflict::column(playlists::Column::Id)
                .update_columns([playlists::Column::Name, playlists::Column::UserId])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        PlaylistEpisodes::delete_many()
            .filter(playlist_episodes::Column::PlaylistId.eq(playlist.id()))
            .exec(&txn)
            .await?;
        PlaylistPodcasts::delete_many()
            .filter(playlist_podcasts::Column::PlaylistId.eq(playlist.id()))
            .exec(&txn)
            .await?;
        Self::insert_links(&txn, playlist).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn insert_links<C: ConnectionTrait>(conn: &C, playlist: &Playlist) -> Result<()> {
        for episode in playlist.episodes() {
            PlaylistEpisodes::insert(playlist_episodes::ActiveModel {
                playlist_id: Set(playlist.id()),
                episode_id: Set(episode.id()),
            })
            .on_conflict(
                OnConflict::columns([
                    playlist_episodes::Column::PlaylistId,
                    playlist_episodes::Column::EpisodeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        }

        for podcast in playlist.podcasts() {
            PlaylistPodcasts::insert(playlist_podcasts::ActiveModel {
                playlist_id: Set(playlist.id()),
                podcast_id: Set(podcast.id()),
            })
            .on_conflict(
                OnConflict::columns([
                    playlist_podcasts::Column::PlaylistId,
                    playlist_podcasts::Column::PodcastId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        }

        Ok(())
    }

    pub async fn get(&self, playlist_id: i32) -> Result<Option<Playlist>> {
        let Some(model) = Playlists::find_by_id(playlist_id).one(&self.conn).await? else {
            return Ok(None);
        };
        Ok(Some(self.hydrate(model).await?))
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Playlist>> {
        let models = Playlists::find()
            .filter(playlists::Column::UserId.eq(user_id))
            .order_by_asc(playlists::Column::Id)
            .all(&self.conn)
            .await?;

        let mut playlists = Vec::with_capacity(models.len());
        for model in models {
            playlists.push(self.hydrate(model).await?);
        }
        Ok(playlists)
    }

    /// One greater than the highest stored id, 1 when empty. Recomputed from
    /// storage on every call so it survives process restarts; concurrent
    /// allocators are out of contract (single writer).
    pub async fn next_id(&self) -> Result<i32> {
        let top = Playlists::find()
            .order_by_desc(playlists::Column::Id)
            .one(&self.conn)
            .await?;
        Ok(top.map_or(0, |m| m.id) + 1)
    }

    async fn hydrate(&self, model: playlists::Model) -> Result<Playlist> {
        let owner_model = Users::find_by_id(model.user_id)
            .one(&self.conn)
            .await?
            .with_context(|| format!("playlist {} references a missing user", model.id))?;
        let owner = user_to_domain(&owner_model)?;
        let mut playlist = Playlist::new(model.id, &model.name, owner)?;

        let episode_rows = Episodes::find()
            .join(
                JoinType::InnerJoin,
                episodes::Relation::PlaylistEpisodes.def(),
            )
            .filter(playlist_episodes::Column::PlaylistId.eq(model.id))
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await?;
        for row in episode_rows {
            playlist.add_episode(episode_to_domain(row)?);
        }

        let podcast_ids: Vec<i32> = PlaylistPodcasts::find()
            .filter(playlist_podcasts::Column::PlaylistId.eq(model.id))
            .order_by_asc(playlist_podcasts::Column::PodcastId)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|link| link.podcast_id)
            .collect();
        for podcast in PodcastRepository::new(self.conn.clone())
            .get_by_ids(&podcast_ids)
            .await?
        {
            playlist.add_podcast(podcast);
        }

        Ok(playlist)
    }
}
