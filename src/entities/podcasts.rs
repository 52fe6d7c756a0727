use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "podcasts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub title: String,

    pub image_url: Option<String>,

    pub description: Option<String>,

    pub language: Option<String>,

    pub website_url: Option<String>,

    pub author_id: Option<i32>,

    pub itunes_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::authors::Entity",
        from = "Column::AuthorId",
        to = "super::authors::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Authors,

    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,

    #[sea_orm(has_many = "super::podcast_categories::Entity")]
    PodcastCategories,
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Authors.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::podcast_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::podcast_categories::Relation::Podcasts.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
