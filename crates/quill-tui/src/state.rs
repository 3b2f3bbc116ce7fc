//! Application state composition.
//!
//! Top-level state hierarchy for the TUI:
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── screen: Screen        (Login, Signup, or Home)
//! │   ├── session: SessionStore (token on disk)
//! │   ├── posts: PostsState     (canonical post list)
//! │   ├── profile: ProfileState (signed-in user panel)
//! │   ├── notices: Notices      (transient status messages)
//! │   ├── task_seq: TaskSeq     (async task id generator)
//! │   └── tasks: Tasks          (task lifecycle state)
//! └── overlay: Option<Overlay>  (modal editor / viewer)
//! ```
//!
//! State is split between `TuiState` (non-overlay) and `Option<Overlay>`:
//! this allows overlay handlers to get `&mut self` and `&mut TuiState`
//! simultaneously without borrow conflicts.

use quill_core::config::Config;
use quill_core::session::SessionStore;

use crate::common::{Notices, TaskSeq, Tasks};
use crate::features::auth::{LoginForm, SignupForm};
use crate::features::posts::PostsState;
use crate::features::profile::ProfileState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, session: SessionStore) -> Self {
        Self {
            tui: TuiState::new(config, session),
            overlay: None,
        }
    }
}

/// The screen currently owning keyboard input (when no overlay is open).
///
/// Auth form state lives inside the variant, so switching screens drops
/// any half-typed credentials.
#[derive(Debug)]
pub enum Screen {
    Login(LoginForm),
    Signup(SignupForm),
    Home,
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current screen.
    pub screen: Screen,
    /// Session token store (reads the file fresh on each access).
    pub session: SessionStore,
    /// Client configuration (API base URL).
    pub config: Config,
    /// Post list state, populated on the home screen.
    pub posts: PostsState,
    /// Signed-in user panel state.
    pub profile: ProfileState,
    /// Transient status messages with a TTL.
    pub notices: Notices,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config, session: SessionStore) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Login(LoginForm::default()),
            session,
            config,
            posts: PostsState::default(),
            profile: ProfileState::default(),
            notices: Notices::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    /// Resolves a server-relative image path against the API base URL.
    pub fn resolve_image_url(&self, relative: &str) -> String {
        let base = self.config.api_base_url.trim_end_matches('/');
        let rel = relative.trim_start_matches('/');
        format!("{base}/{rel}")
    }
}
