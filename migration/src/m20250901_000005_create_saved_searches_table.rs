use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_users_table::Users;
use crate::m20250901_000002_create_announcement_tables::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedSearches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedSearches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedSearches::UserId).uuid().not_null())
                    .col(ColumnDef::new(SavedSearches::Name).string_len(255).not_null())
                    .col(ColumnDef::new(SavedSearches::CategoryId).integer())
                    .col(ColumnDef::new(SavedSearches::Keywords).text())
                    .col(
                        ColumnDef::new(SavedSearches::NotifyEmail)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SavedSearches::NotifyPush)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SavedSearches::NotifySms)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SavedSearches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_searches_user_id")
                            .from(SavedSearches::Table, SavedSearches::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_searches_category_id")
                            .from(SavedSearches::Table, SavedSearches::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_searches_user_id")
                    .table(SavedSearches::Table)
                    .col(SavedSearches::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedSearches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SavedSearches {
    Table,
    Id,
    UserId,
    Name,
    CategoryId,
    Keywords,
    NotifyEmail,
    NotifyPush,
    NotifySms,
    CreatedAt,
}
