//! Blog post entity for SeaORM.

use sea_orm::entity::prelude::*;

use blog_core::domain::BlogPost;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: String,
    pub blog_name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub category_id: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub comment_ids: Json,
    pub tag_ids: Json,
    pub like_ids: Json,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
    pub is_published: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn id_list(value: Json) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

/// Conversion from SeaORM Model to the domain post.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            post_id: model.post_id,
            blog_name: model.blog_name,
            content: model.content,
            category: model.category,
            category_id: model.category_id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_email: model.author_email,
            comment_ids: id_list(model.comment_ids),
            tag_ids: id_list(model.tag_ids),
            like_ids: id_list(model.like_ids),
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_published: model.is_published,
            view_count: model.view_count,
            like_count: model.like_count,
            comment_count: model.comment_count,
        }
    }
}
