use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Blogs::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Blogs::Title).string().not_null())
                    .col(ColumnDef::new(Blogs::Content).text().not_null())
                    .col(ColumnDef::new(Blogs::Image).string().null())
                    .col(ColumnDef::new(Blogs::Category).string().null())
                    .col(
                        ColumnDef::new(Blogs::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(Blogs::CommentIds)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(Blogs::Claps)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Blogs::Claps).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Blogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blogs_author")
                            .from(Blogs::Table, Blogs::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blogs_author_id")
                    .table(Blogs::Table)
                    .col(Blogs::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Listing order.
        manager
            .create_index(
                Index::create()
                    .name("idx_blogs_created_at")
                    .table(Blogs::Table)
                    .col(Blogs::CreatedAt)
                    .col(Blogs::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Blogs {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    Image,
    Category,
    Tags,
    CommentIds,
    Claps,
    CreatedAt,
    UpdatedAt,
}
