#[cfg(test)]
mod tests {
    use crate::database::entity::{blog, user};
    use crate::database::postgres_repo::{PostgresBlogRepository, PostgresUserRepository};
    use inkwell_core::domain::Blog;
    use inkwell_core::error::RepoError;
    use inkwell_core::ports::{BaseRepository, BlogRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn blog_model(id: uuid::Uuid, claps: i64) -> blog::Model {
        let now = chrono::Utc::now();
        blog::Model {
            id,
            author_id: uuid::Uuid::new_v4(),
            title: "The Art of Minimalism".to_owned(),
            content: "Less is more.".to_owned(),
            image: None,
            category: Some("Lifestyle".to_owned()),
            tags: vec!["minimalism".to_owned(), "focus".to_owned()],
            comment_ids: vec![],
            claps,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_blog_by_id() {
        let blog_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![blog_model(blog_id, 3)]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);

        let result: Option<Blog> = repo.find_by_id(blog_id).await.unwrap();

        let blog = result.unwrap();
        assert_eq!(blog.id, blog_id);
        assert_eq!(blog.title, "The Art of Minimalism");
        assert_eq!(blog.tags, vec!["minimalism", "focus"]);
        assert_eq!(blog.claps, 3);
    }

    #[tokio::test]
    async fn test_increment_claps_returns_new_count() {
        let blog_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![blog_model(blog_id, 6)]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);

        assert_eq!(repo.increment_claps(blog_id).await.unwrap(), Some(6));
    }

    #[tokio::test]
    async fn test_increment_claps_unknown_blog() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<blog::Model>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);

        assert_eq!(
            repo.increment_claps(uuid::Uuid::new_v4()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_delete_missing_blog_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);

        let result = <PostgresBlogRepository as BaseRepository<Blog, uuid::Uuid>>::delete(
            &repo,
            uuid::Uuid::new_v4(),
        )
        .await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let now = chrono::Utc::now();
        let user_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                name: "Jane Austen".to_owned(),
                email: "jane@example.com".to_owned(),
                password_hash: "$argon2id$hash".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo
            .find_by_email("jane@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name, "Jane Austen");
    }

    #[tokio::test]
    async fn test_find_by_ids_with_no_ids_skips_query() {
        // No results are queued: any query would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresUserRepository::new(db);

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }
}
