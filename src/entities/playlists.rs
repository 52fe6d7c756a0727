use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "playlists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub name: String,

    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(has_many = "super::playlist_episodes::Entity")]
    PlaylistEpisodes,

    #[sea_orm(has_many = "super::playlist_podcasts::Entity")]
    PlaylistPodcasts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::playlist_episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaylistEpisodes.def()
    }
}

impl Related<super::playlist_podcasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaylistPodcasts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
