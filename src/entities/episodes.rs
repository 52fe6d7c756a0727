use sea_orm::entity::prelude::*;

/// Publish date and time live in separate columns because the source format
/// carries them as one offset-suffixed string that is split during import.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub podcast_id: i32,

    pub title: String,

    pub audio_url: Option<String>,

    pub audio_len: i32,

    pub description: Option<String>,

    pub pub_date: Date,

    pub pub_time: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::podcasts::Entity",
        from = "Column::PodcastId",
        to = "super::podcasts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Podcasts,

    #[sea_orm(has_many = "super::playlist_episodes::Entity")]
    PlaylistEpisodes,
}

impl Related<super::podcasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Podcasts.def()
    }
}

impl Related<super::playlist_episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaylistEpisodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
