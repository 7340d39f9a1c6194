use sea_orm::entity::prelude::*;

use crate::announcement::application::domain::entities::Category;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub parent_id: Option<i32>,
    pub category_type: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posts::Entity")]
    Posts,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_category(self, post_count: Option<u64>) -> Category {
        Category {
            id: self.id,
            name: self.name,
            slug: self.slug,
            url: self.url,
            parent_id: self.parent_id,
            category_type: self.category_type,
            post_count,
        }
    }
}
