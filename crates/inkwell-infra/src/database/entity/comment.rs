//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// No foreign key: comments outlive the blog they were written on.
    pub blog_id: Uuid,
    pub author_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog::Entity",
        from = "Column::BlogId",
        to = "super::blog::Column::Id"
    )]
    Blog,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::blog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for inkwell_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            blog_id: model.blog_id,
            author_id: model.author_id,
            content: model.content,
            created_at: model.created_at.into(),
        }
    }
}

impl From<inkwell_core::domain::Comment> for ActiveModel {
    fn from(comment: inkwell_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            blog_id: Set(comment.blog_id),
            author_id: Set(comment.author_id),
            content: Set(comment.content),
            created_at: Set(comment.created_at.into()),
        }
    }
}
