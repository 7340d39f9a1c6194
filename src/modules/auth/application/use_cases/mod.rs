pub mod create_saved_search;
pub mod get_current_user;
pub mod list_saved_searches;
pub mod login_user;
pub mod logout_user;
pub mod signup_user;
pub mod update_notification_preferences;
pub mod update_profile;
