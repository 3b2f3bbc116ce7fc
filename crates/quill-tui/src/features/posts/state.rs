use quill_core::api::BlogPost;

/// Lifecycle of the list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostsPhase {
    /// Nothing fetched yet (before the screen mounts).
    #[default]
    Idle,
    /// A full fetch is in flight.
    Loading,
    /// The list mirrors the last successful server response.
    Loaded,
    /// The last fetch failed; the list stays empty, no stale fallback.
    Error,
}

/// Canonical in-memory post collection, in server order.
///
/// Mutations never touch `posts` directly: every create/update/delete
/// round-trips through the API and is followed by a full refetch, so the
/// list only ever changes when the server confirms it.
#[derive(Debug, Default)]
pub struct PostsState {
    pub phase: PostsPhase,
    pub posts: Vec<BlogPost>,
    pub selected: usize,
}

impl PostsState {
    pub fn selected_post(&self) -> Option<&BlogPost> {
        self.posts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.posts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replaces the list with a fresh server response, keeping the cursor
    /// in bounds.
    pub fn set_loaded(&mut self, posts: Vec<BlogPost>) {
        self.posts = posts;
        self.phase = PostsPhase::Loaded;
        if self.selected >= self.posts.len() {
            self.selected = self.posts.len().saturating_sub(1);
        }
    }

    /// Records a failed fetch: empty list, error phase.
    pub fn set_failed(&mut self) {
        self.posts.clear();
        self.selected = 0;
        self.phase = PostsPhase::Error;
    }
}
