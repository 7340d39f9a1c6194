use std::sync::Arc;

use crate::billing::application::use_cases::{
    cancel_subscription::ICancelSubscriptionUseCase, create_checkout::ICreateCheckoutUseCase,
    expire_subscriptions::IExpireSubscriptionsUseCase, get_subscription::IGetSubscriptionUseCase,
    handle_webhook::IHandleWebhookUseCase, renew_subscriptions::IRenewSubscriptionsUseCase,
};

#[derive(Clone)]
pub struct BillingUseCases {
    pub subscription: Arc<dyn IGetSubscriptionUseCase + Send + Sync>,
    pub checkout: Arc<dyn ICreateCheckoutUseCase + Send + Sync>,
    pub cancel: Arc<dyn ICancelSubscriptionUseCase + Send + Sync>,
    pub webhook: Arc<dyn IHandleWebhookUseCase + Send + Sync>,
    pub expire: Arc<dyn IExpireSubscriptionsUseCase + Send + Sync>,
    pub renew: Arc<dyn IRenewSubscriptionsUseCase + Send + Sync>,
}
