pub mod dto;
pub mod login;
pub mod logout;
pub mod me;
pub mod notification_preferences;
pub mod saved_searches;
pub mod signup;

pub use login::login_handler;
pub use logout::logout_handler;
pub use me::{get_me_handler, update_me_handler};
pub use notification_preferences::update_notification_preferences_handler;
pub use saved_searches::{create_saved_search_handler, list_saved_searches_handler};
pub use signup::signup_handler;
