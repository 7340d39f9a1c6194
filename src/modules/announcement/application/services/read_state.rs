use tracing::warn;

use crate::announcement::application::{
    domain::entities::Post, ports::outgoing::ReadTracker,
};
use crate::auth::application::domain::entities::UserId;

/// Fills `is_read` for a signed-in viewer. Anonymous viewers get no flag.
///
/// A failed lookup leaves every post unread rather than failing the page.
pub async fn annotate_read_state(
    tracker: &dyn ReadTracker,
    viewer: Option<UserId>,
    posts: &mut [Post],
) {
    let Some(user_id) = viewer else {
        return;
    };

    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let read = match tracker.read_among(user_id, &ids).await {
        Ok(read) => read,
        Err(e) => {
            warn!(%user_id, error = %e, "Read state lookup failed");
            Default::default()
        }
    };

    for post in posts.iter_mut() {
        post.is_read = Some(read.contains(&post.id));
    }
}
