use chrono::{Duration, Utc};

use crate::announcement::application::domain::entities::{Category, Post};
use crate::auth::application::domain::entities::{
    BillingDetails, NotificationPreferences, SubscriptionStatus, UserAccount, UserId,
};

/// Account five days into a ten day trial.
pub fn sample_account() -> UserAccount {
    let now = Utc::now();
    UserAccount {
        id: UserId::new(),
        email: "user@example.com".to_string(),
        full_name: Some("Test User".to_string()),
        phone_number: None,
        subscription_status: SubscriptionStatus::Trial,
        trial_end_date: now + Duration::days(5),
        subscription_end_date: None,
        notifications: NotificationPreferences::default(),
        sms_credits: 0.0,
        billing: BillingDetails::default(),
        created_at: now - Duration::days(5),
        last_login: None,
    }
}

pub fn sample_category(id: i32) -> Category {
    Category {
        id,
        name: format!("Κατηγορία {id}"),
        slug: format!("katigoria-{id}"),
        url: format!("https://www.eof.gr/category/katigoria-{id}/"),
        parent_id: None,
        category_type: None,
        post_count: None,
    }
}

pub fn sample_post(id: i32) -> Post {
    Post {
        id,
        title: format!("Ανάκληση παρτίδας {id}"),
        url: format!("https://www.eof.gr/anakoinosi-{id}/"),
        content: Some(format!("Κείμενο ανακοίνωσης {id}")),
        excerpt: None,
        category_id: Some(3),
        category_name: Some("Ανακλήσεις".to_string()),
        publish_date: Some(Utc::now() - Duration::days(1)),
        author: None,
        meta_description: None,
        tags: Vec::new(),
        is_active: true,
        scraped_at: Utc::now(),
        last_modified: None,
        attachments: Vec::new(),
        is_read: None,
    }
}
