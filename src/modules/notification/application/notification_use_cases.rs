use std::sync::Arc;

use crate::notification::application::domain::vapid::VapidConfig;
use crate::notification::application::use_cases::{
    notification_history::INotificationHistoryUseCase, subscribe_push::ISubscribePushUseCase,
    unsubscribe_push::IUnsubscribePushUseCase,
};

#[derive(Clone)]
pub struct NotificationUseCases {
    pub subscribe: Arc<dyn ISubscribePushUseCase + Send + Sync>,
    pub unsubscribe: Arc<dyn IUnsubscribePushUseCase + Send + Sync>,
    pub history: Arc<dyn INotificationHistoryUseCase + Send + Sync>,
    pub vapid: VapidConfig,
}
