use sea_orm::entity::prelude::*;

use crate::announcement::application::domain::entities::{Attachment, Post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", unique)]
    pub url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    pub category_id: Option<i32>,
    pub publish_date: Option<DateTimeWithTimeZone>,
    pub author: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub is_active: bool,
    pub scraped_at: DateTimeWithTimeZone,
    pub last_modified: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "SetNull"
    )]
    Categories,

    #[sea_orm(has_many = "super::attachments::Entity")]
    Attachments,

    #[sea_orm(has_many = "super::user_read_posts::Entity")]
    UserReadPosts,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl Related<super::user_read_posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserReadPosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn tags_to_json(tags: &[String]) -> Json {
    Json::from(tags.to_vec())
}

impl Model {
    /// Tag lists that are not an array of strings read as empty.
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_value(self.tags.clone()).unwrap_or_default()
    }

    pub fn into_post(self, category_name: Option<String>, attachments: Vec<Attachment>) -> Post {
        let tags = self.tag_list();
        Post {
            id: self.id,
            title: self.title,
            url: self.url,
            content: self.content,
            excerpt: self.excerpt,
            category_id: self.category_id,
            category_name,
            publish_date: self.publish_date.map(|d| d.to_utc()),
            author: self.author,
            meta_description: self.meta_description,
            tags,
            is_active: self.is_active,
            scraped_at: self.scraped_at.to_utc(),
            last_modified: self.last_modified.map(|d| d.to_utc()),
            attachments,
            is_read: None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_model(id: i32) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id,
        title: format!("Ανάκληση παρτίδας {id}"),
        url: format!("https://www.eof.gr/anakoinosi-{id}/"),
        content: Some("Ο ΕΟΦ ανακαλεί την παρτίδα".into()),
        excerpt: None,
        category_id: Some(2),
        publish_date: Some(now),
        author: None,
        meta_description: None,
        tags: serde_json::json!(["ανάκληση"]),
        is_active: true,
        scraped_at: now,
        last_modified: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_tags_read_as_empty() {
        let mut model = sample_model(1);
        model.tags = serde_json::json!({ "not": "a list" });
        assert!(model.tag_list().is_empty());
    }

    #[test]
    fn into_post_carries_category_and_tags() {
        let post = sample_model(3).into_post(Some("Ανακλήσεις".into()), vec![]);
        assert_eq!(post.category_name.as_deref(), Some("Ανακλήσεις"));
        assert_eq!(post.tags, vec!["ανάκληση".to_string()]);
        assert_eq!(post.is_read, None);
    }

    #[test]
    fn tags_serialize_as_json_array() {
        let json = tags_to_json(&["a".to_string(), "b".to_string()]);
        assert_eq!(json, serde_json::json!(["a", "b"]));
    }
}
