use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // categories
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Categories::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Url).text().not_null())
                    .col(ColumnDef::new(Categories::ParentId).integer())
                    .col(ColumnDef::new(Categories::CategoryType).string_len(50))
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent_id")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // posts
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::Title).text().not_null())
                    .col(ColumnDef::new(Posts::Url).text().not_null().unique_key())
                    .col(ColumnDef::new(Posts::Content).text())
                    .col(ColumnDef::new(Posts::Excerpt).text())
                    .col(ColumnDef::new(Posts::CategoryId).integer())
                    .col(ColumnDef::new(Posts::PublishDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Posts::Author).string_len(255))
                    .col(ColumnDef::new(Posts::MetaDescription).text())
                    .col(ColumnDef::new(Posts::Tags).json_binary().not_null())
                    .col(
                        ColumnDef::new(Posts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Posts::ScrapedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Posts::LastModified).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_category_id")
                            .from(Posts::Table, Posts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // attachments
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Attachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attachments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attachments::PostId).integer().not_null())
                    .col(ColumnDef::new(Attachments::FileUrl).text().not_null())
                    .col(ColumnDef::new(Attachments::FileName).string_len(255))
                    .col(ColumnDef::new(Attachments::FileType).string_len(20))
                    .col(ColumnDef::new(Attachments::FileSize).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attachments_post_id")
                            .from(Attachments::Table, Attachments::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_posts_category_id ON posts (category_id);
                CREATE INDEX IF NOT EXISTS idx_posts_publish_date ON posts (publish_date DESC);
                CREATE INDEX IF NOT EXISTS idx_posts_scraped_at ON posts (scraped_at DESC);
                CREATE INDEX IF NOT EXISTS idx_attachments_post_id ON attachments (post_id);
                CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories (parent_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Url,
    ParentId,
    CategoryType,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Posts {
    Table,
    Id,
    Title,
    Url,
    Content,
    Excerpt,
    CategoryId,
    PublishDate,
    Author,
    MetaDescription,
    Tags,
    IsActive,
    ScrapedAt,
    LastModified,
}

#[derive(DeriveIden)]
enum Attachments {
    Table,
    Id,
    PostId,
    FileUrl,
    FileName,
    FileType,
    FileSize,
}
