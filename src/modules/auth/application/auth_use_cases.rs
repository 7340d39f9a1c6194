use std::sync::Arc;

use crate::auth::application::use_cases::{
    create_saved_search::ICreateSavedSearchUseCase, get_current_user::IGetCurrentUserUseCase,
    list_saved_searches::IListSavedSearchesUseCase, login_user::ILoginUserUseCase,
    logout_user::ILogoutUseCase, signup_user::ISignupUserUseCase,
    update_notification_preferences::IUpdateNotificationPreferencesUseCase,
    update_profile::IUpdateProfileUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub signup: Arc<dyn ISignupUserUseCase + Send + Sync>,
    pub login: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub logout: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
    pub update_profile: Arc<dyn IUpdateProfileUseCase + Send + Sync>,
    pub update_preferences: Arc<dyn IUpdateNotificationPreferencesUseCase + Send + Sync>,
    pub list_saved_searches: Arc<dyn IListSavedSearchesUseCase + Send + Sync>,
    pub create_saved_search: Arc<dyn ICreateSavedSearchUseCase + Send + Sync>,
}
