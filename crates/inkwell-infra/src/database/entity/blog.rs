//! Blog entity for SeaORM.
//!
//! `tags` and `comment_ids` are PostgreSQL arrays so a row carries the same
//! shape as the blog document.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub comment_ids: Vec<Uuid>,
    pub claps: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for inkwell_core::domain::Blog {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            image: model.image,
            category: model.category,
            tags: model.tags,
            comment_ids: model.comment_ids,
            claps: u64::try_from(model.claps).unwrap_or(0),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<inkwell_core::domain::Blog> for ActiveModel {
    fn from(blog: inkwell_core::domain::Blog) -> Self {
        Self {
            id: Set(blog.id),
            author_id: Set(blog.author_id),
            title: Set(blog.title),
            content: Set(blog.content),
            image: Set(blog.image),
            category: Set(blog.category),
            tags: Set(blog.tags),
            comment_ids: Set(blog.comment_ids),
            claps: Set(i64::try_from(blog.claps).unwrap_or(i64::MAX)),
            created_at: Set(blog.created_at.into()),
            updated_at: Set(blog.updated_at.into()),
        }
    }
}
