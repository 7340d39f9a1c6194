use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // payments
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Payments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Payments::AmountCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::Currency)
                            .string_len(3)
                            .not_null()
                            .default("EUR"),
                    )
                    .col(ColumnDef::new(Payments::PaymentType).string_len(50).not_null())
                    .col(ColumnDef::new(Payments::ProviderOrderCode).string_len(255))
                    .col(ColumnDef::new(Payments::ProviderTransactionId).string_len(255))
                    .col(ColumnDef::new(Payments::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_user_id")
                            .from(Payments::Table, Payments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // scrape_logs
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(ScrapeLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapeLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapeLogs::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapeLogs::EndTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(ScrapeLogs::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(ScrapeLogs::PostsScraped)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScrapeLogs::PostsNew)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScrapeLogs::PostsUpdated)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ScrapeLogs::Errors).text())
                    .col(ColumnDef::new(ScrapeLogs::DurationSeconds).double())
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // consent_records
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(ConsentRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsentRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(ConsentRecords::VisitorId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConsentRecords::UserId).uuid())
                    .col(ColumnDef::new(ConsentRecords::Consent).json_binary().not_null())
                    .col(
                        ColumnDef::new(ConsentRecords::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consent_records_user_id")
                            .from(ConsentRecords::Table, ConsentRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_payments_user_created_at
                ON payments (user_id, created_at DESC);

                CREATE INDEX IF NOT EXISTS idx_scrape_logs_start_time
                ON scrape_logs (start_time DESC);

                CREATE INDEX IF NOT EXISTS idx_consent_records_visitor
                ON consent_records (visitor_id, recorded_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsentRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScrapeLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    UserId,
    AmountCents,
    Currency,
    PaymentType,
    ProviderOrderCode,
    ProviderTransactionId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScrapeLogs {
    Table,
    Id,
    StartTime,
    EndTime,
    Status,
    PostsScraped,
    PostsNew,
    PostsUpdated,
    Errors,
    DurationSeconds,
}

#[derive(DeriveIden)]
enum ConsentRecords {
    Table,
    Id,
    VisitorId,
    UserId,
    Consent,
    RecordedAt,
}
