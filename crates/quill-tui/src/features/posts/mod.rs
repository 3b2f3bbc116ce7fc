//! The post list: the one component that owns the canonical collection of
//! blog posts and its refresh cycle.

pub mod render;
pub mod state;
pub mod update;

pub use render::render_posts;
pub use state::{PostsPhase, PostsState};
