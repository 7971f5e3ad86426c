use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    /// Assigned by the catalogue import, never generated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub synopsis: Option<String>,
    pub thumbnail_ref: Option<String>,
    pub folder_ref: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub release_date: Option<String>,
    pub catalogue_score: Option<f32>,
    /// JSON object, see `domain::title_info::TitleInfo`.
    pub info: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::title_genres::Entity")]
    TitleGenres,
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
    #[sea_orm(has_many = "super::shelf_entries::Entity")]
    ShelfEntries,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
}

impl Related<super::title_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleGenres.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::shelf_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShelfEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
