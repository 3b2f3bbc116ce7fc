//! Event types consumed by the reducer.
//!
//! Everything that can change state arrives here: terminal input, the
//! frame tick, navigation requests, and the results of spawned API calls
//! (wrapped in the task lifecycle envelope so stale results can be
//! discarded).

use quill_core::api::{ApiError, BlogPost, User};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Navigation targets. The route guard sits between a `Navigate` event and
/// the screen actually shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Home,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick: advances the spinner, prunes notices.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Navigation request; passes through the route guard.
    Navigate(Route),
    /// A spawned task began.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// A spawned task finished; `result` is unwrapped only if the task is
    /// still the active one of its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted,
    },
    Auth(AuthUiEvent),
    Profile(ProfileUiEvent),
    Posts(PostsUiEvent),
}

#[derive(Debug)]
pub enum AuthUiEvent {
    /// Login call finished; Ok carries the bearer token.
    LoginFinished(Result<String, ApiError>),
    /// Signup call finished.
    SignupFinished(Result<(), ApiError>),
}

#[derive(Debug)]
pub enum ProfileUiEvent {
    Loaded(User),
    Failed(String),
}

#[derive(Debug)]
pub enum PostsUiEvent {
    /// Full list fetch finished, in server order.
    Listed(Vec<BlogPost>),
    ListFailed(String),
    /// Create or update succeeded; `created` picks the success message.
    Saved { created: bool },
    SaveFailed(String),
    Deleted,
    DeleteFailed(String),
}
