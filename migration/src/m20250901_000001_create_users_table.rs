use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::FullName).string_len(255))
                    .col(ColumnDef::new(Users::PhoneNumber).string_len(20))
                    .col(
                        ColumnDef::new(Users::SubscriptionStatus)
                            .string_len(20)
                            .not_null()
                            .default("trial"),
                    )
                    .col(
                        ColumnDef::new(Users::TrialStartDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::TrialEndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::SubscriptionStartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::SubscriptionEndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::VivaTransactionId).string_len(255))
                    .col(
                        ColumnDef::new(Users::EmailNotifications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::PushNotifications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::SmsNotifications)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::SmsCredits)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Users::CompanyName).string_len(255))
                    .col(ColumnDef::new(Users::TaxId).string_len(50))
                    .col(ColumnDef::new(Users::TaxOffice).string_len(100))
                    .col(ColumnDef::new(Users::BillingAddress).string_len(255))
                    .col(ColumnDef::new(Users::BillingCity).string_len(100))
                    .col(ColumnDef::new(Users::BillingPostalCode).string_len(20))
                    .col(
                        ColumnDef::new(Users::InvoiceType)
                            .string_len(20)
                            .not_null()
                            .default("receipt"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // The expiry sweep scans by status and end date.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_users_status_trial_end
                ON users (subscription_status, trial_end_date);

                CREATE INDEX IF NOT EXISTS idx_users_status_subscription_end
                ON users (subscription_status, subscription_end_date);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ language 'plpgsql';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_users_updated_at
                BEFORE UPDATE ON users
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_users_updated_at ON users")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column")
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    PhoneNumber,
    SubscriptionStatus,
    TrialStartDate,
    TrialEndDate,
    SubscriptionStartDate,
    SubscriptionEndDate,
    VivaTransactionId,
    EmailNotifications,
    PushNotifications,
    SmsNotifications,
    SmsCredits,
    CompanyName,
    TaxId,
    TaxOffice,
    BillingAddress,
    BillingCity,
    BillingPostalCode,
    InvoiceType,
    CreatedAt,
    UpdatedAt,
    LastLogin,
}
