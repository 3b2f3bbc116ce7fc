//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//! This keeps the reducer pure: it mutates state and returns effects,
//! never performs I/O or spawns tasks itself.

use std::path::PathBuf;

use crate::common::TaskId;
use crate::events::Route;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Re-enter the navigation path (and thus the route guard) as a new
    /// event. Used where a flow forces a redirect, e.g. logout.
    Navigate(Route),

    /// Persist the session token. Executed inline before any following
    /// effect, so a Navigate right after it sees the new session.
    PersistToken { token: String },

    /// Clear the session token (logout, failed login).
    ClearToken,

    /// POST /users/login.
    Login {
        task: TaskId,
        email: String,
        password: String,
    },

    /// POST /users/signup.
    Signup {
        task: TaskId,
        username: String,
        email: String,
        password: String,
        profile_image: Option<PathBuf>,
    },

    /// GET /users/profile with the current token.
    FetchProfile { task: TaskId },

    /// GET /blogs with the current token.
    FetchPosts { task: TaskId },

    /// POST /blogs (multipart with image).
    CreatePost {
        task: TaskId,
        title: String,
        description: String,
        image: PathBuf,
    },

    /// PUT /blogs/:id; no image means "keep the existing one".
    UpdatePost {
        task: TaskId,
        id: String,
        title: String,
        description: String,
        image: Option<PathBuf>,
    },

    /// DELETE /blogs/:id.
    DeletePost { task: TaskId, id: String },
}
