use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::notification::application::{
    domain::entities::NotificationLogEntry, ports::outgoing::NotificationHistoryQuery,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationHistoryError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait INotificationHistoryUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryError>;
}

#[derive(Clone)]
pub struct NotificationHistoryUseCase<Q>
where
    Q: NotificationHistoryQuery + Send + Sync,
{
    query: Q,
}

impl<Q> NotificationHistoryUseCase<Q>
where
    Q: NotificationHistoryQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> INotificationHistoryUseCase for NotificationHistoryUseCase<Q>
where
    Q: NotificationHistoryQuery + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryError> {
        self.query
            .list(user_id, limit)
            .await
            .map_err(|e| NotificationHistoryError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::application::domain::entities::NotificationChannel;
    use crate::notification::application::ports::outgoing::NotificationHistoryQueryError;
    use chrono::Utc;

    struct OneEntry;

    #[async_trait]
    impl NotificationHistoryQuery for OneEntry {
        async fn list(
            &self,
            _user_id: UserId,
            limit: u64,
        ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryQueryError> {
            assert_eq!(limit, 50);
            Ok(vec![NotificationLogEntry {
                id: 1,
                post_id: Some(3),
                notification_type: NotificationChannel::Push,
                status: "sent".into(),
                message: None,
                cost: 0.0,
                sent_at: Utc::now(),
            }])
        }
    }

    #[tokio::test]
    async fn returns_history() {
        let history = NotificationHistoryUseCase::new(OneEntry)
            .execute(UserId::new(), 50)
            .await
            .unwrap();
        assert_eq!(history[0].notification_type, NotificationChannel::Push);
    }
}
