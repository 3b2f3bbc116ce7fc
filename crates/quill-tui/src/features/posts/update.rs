//! Post list reducer functions.
//!
//! These apply `PostsUiEvent`s to the list state. The policy throughout:
//! mutation results carry nothing authoritative; the list is the source of
//! truth and is refreshed with a full fetch after every successful
//! mutation.

use crate::common::{Notices, TaskSeq};
use crate::effects::UiEffect;
use crate::events::PostsUiEvent;

use super::state::{PostsPhase, PostsState};

pub fn handle_posts_event(
    posts: &mut PostsState,
    notices: &mut Notices,
    task_seq: &mut TaskSeq,
    event: PostsUiEvent,
) -> Vec<UiEffect> {
    match event {
        PostsUiEvent::Listed(list) => {
            posts.set_loaded(list);
            vec![]
        }
        PostsUiEvent::ListFailed(message) => {
            posts.set_failed();
            notices.error(format!("Error fetching blogs: {message}"));
            vec![]
        }
        PostsUiEvent::Saved { created } => {
            notices.success(if created {
                "Blog created successfully!"
            } else {
                "Blog updated successfully!"
            });
            refetch(posts, task_seq)
        }
        PostsUiEvent::SaveFailed(_) => {
            // The editor overlay shows the message inline; nothing to do
            // at the list level, and the list itself is untouched.
            vec![]
        }
        PostsUiEvent::Deleted => {
            notices.success("Blog deleted successfully!");
            refetch(posts, task_seq)
        }
        PostsUiEvent::DeleteFailed(message) => {
            notices.error(format!("Error deleting blog: {message}"));
            vec![]
        }
    }
}

/// Spawns the unconditional full refetch that follows every successful
/// mutation (and the initial mount).
pub fn refetch(posts: &mut PostsState, task_seq: &mut TaskSeq) -> Vec<UiEffect> {
    posts.phase = PostsPhase::Loading;
    vec![UiEffect::FetchPosts {
        task: task_seq.next_id(),
    }]
}
