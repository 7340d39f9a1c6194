use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_users_table::Users;
use crate::m20250901_000002_create_announcement_tables::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserReadPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserReadPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserReadPosts::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserReadPosts::PostId).integer().not_null())
                    .col(
                        ColumnDef::new(UserReadPosts::ReadAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_read_posts_user_id")
                            .from(UserReadPosts::Table, UserReadPosts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_read_posts_post_id")
                            .from(UserReadPosts::Table, UserReadPosts::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PushSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PushSubscriptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(PushSubscriptions::UserId).uuid().not_null())
                    .col(ColumnDef::new(PushSubscriptions::Endpoint).text().not_null())
                    .col(ColumnDef::new(PushSubscriptions::P256dh).text().not_null())
                    .col(ColumnDef::new(PushSubscriptions::Auth).text().not_null())
                    .col(
                        ColumnDef::new(PushSubscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_push_subscriptions_user_id")
                            .from(PushSubscriptions::Table, PushSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NotificationLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(NotificationLogs::PostId).integer())
                    .col(
                        ColumnDef::new(NotificationLogs::NotificationType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationLogs::Status).string_len(20).not_null())
                    .col(ColumnDef::new(NotificationLogs::Message).text())
                    .col(
                        ColumnDef::new(NotificationLogs::Cost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(NotificationLogs::SentAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_logs_user_id")
                            .from(NotificationLogs::Table, NotificationLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_logs_post_id")
                            .from(NotificationLogs::Table, NotificationLogs::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One read marker and one push endpoint per user
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_user_read_posts_unique
                ON user_read_posts (user_id, post_id);

                CREATE UNIQUE INDEX IF NOT EXISTS idx_push_subscriptions_user_endpoint
                ON push_subscriptions (user_id, endpoint);

                CREATE INDEX IF NOT EXISTS idx_notification_logs_user_sent_at
                ON notification_logs (user_id, sent_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PushSubscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserReadPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserReadPosts {
    Table,
    Id,
    UserId,
    PostId,
    ReadAt,
}

#[derive(DeriveIden)]
enum PushSubscriptions {
    Table,
    Id,
    UserId,
    Endpoint,
    P256dh,
    Auth,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NotificationLogs {
    Table,
    Id,
    UserId,
    PostId,
    NotificationType,
    Status,
    Message,
    Cost,
    SentAt,
}
