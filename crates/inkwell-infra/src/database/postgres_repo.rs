//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use inkwell_core::domain::{Blog, BlogQuery, Comment, Page, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BlogRepository, CommentRepository, UserRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err, write_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Mask an email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// Escape `LIKE` metacharacters so a keyword is matched literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `lower(title) LIKE %kw% OR lower(content) LIKE %kw%`
fn keyword_condition(keyword: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&keyword.to_lowercase()));
    let contains = |column: blog::Column| {
        Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern.clone()).escape('\\'))
    };

    Condition::any()
        .add(contains(blog::Column::Title))
        .add(contains(blog::Column::Content))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn list(&self, query: &BlogQuery) -> Result<Page<Blog>, RepoError> {
        let mut select = BlogEntity::find();
        if let Some(keyword) = &query.keyword {
            select = select.filter(keyword_condition(keyword));
        }

        let paginator = select
            .order_by_asc(blog::Column::CreatedAt)
            .order_by_asc(blog::Column::Id)
            .paginate(&self.db, query.page_size);

        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(query_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            query,
            total,
        ))
    }

    async fn update_details(&self, blog: &Blog) -> Result<Blog, RepoError> {
        // Only the editable columns are Set; the UPDATE leaves the rest alone.
        let active = blog::ActiveModel {
            id: Unchanged(blog.id),
            title: Set(blog.title.clone()),
            content: Set(blog.content.clone()),
            image: Set(blog.image.clone()),
            category: Set(blog.category.clone()),
            tags: Set(blog.tags.clone()),
            updated_at: Set(blog.updated_at.into()),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(write_err)?;
        Ok(model.into())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError> {
        let result = BlogEntity::find()
            .filter(blog::Column::AuthorId.eq(author_id))
            .order_by_asc(blog::Column::CreatedAt)
            .order_by_asc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_claps(&self, id: Uuid) -> Result<Option<u64>, RepoError> {
        // Single UPDATE ... RETURNING: the row lock makes concurrent claps add up.
        let updated = BlogEntity::update_many()
            .col_expr(blog::Column::Claps, Expr::col(blog::Column::Claps).add(1))
            .filter(blog::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(write_err)?;

        Ok(updated
            .into_iter()
            .next()
            .map(|model| u64::try_from(model.claps).unwrap_or(0)))
    }

    async fn attach_comment(&self, blog_id: Uuid, comment_id: Uuid) -> Result<(), RepoError> {
        let result = BlogEntity::update_many()
            .col_expr(
                blog::Column::CommentIds,
                Expr::cust_with_values("array_append(\"comment_ids\", $1)", [comment_id]),
            )
            .filter(blog::Column::Id.eq(blog_id))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        <Self as inkwell_core::ports::BaseRepository<Comment, Uuid>>::insert(self, comment).await
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::BlogId.eq(blog_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("j@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("plain"), "plain");
    }
}
