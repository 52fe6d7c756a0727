use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::podcast_categories::Entity")]
    PodcastCategories,
}

impl Related<super::podcast_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PodcastCategories.def()
    }
}

impl Related<super::podcasts::Entity> for Entity {
    fn to() -> RelationDef {
        super::podcast_categories::Relation::Podcasts.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::podcast_categories::Relation::Categories.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
