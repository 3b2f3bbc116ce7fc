//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, PostsUiEvent, ProfileUiEvent, Route, UiEvent};
use crate::features::auth::{self, LoginForm, SignupForm};
use crate::features::posts;
use crate::overlays::{Overlay, OverlayRequest, OverlayTransition};
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.notices.prune();
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Navigate(route) => handle_navigate(app, route),
        UiEvent::TaskStarted { kind, started } => {
            // A start notification queued from before the last screen
            // reset must not re-arm the task slot.
            if app.tui.tasks.accepts(started.id) {
                app.tui.tasks.state_mut(kind).on_started(started);
            }
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // Result from a task superseded by navigation; drop it.
                vec![]
            }
        }
        UiEvent::Auth(auth_event) => handle_auth_event(app, auth_event),
        UiEvent::Profile(profile_event) => handle_profile_event(app, profile_event),
        UiEvent::Posts(posts_event) => handle_posts_ui_event(app, posts_event),
    }
}

// ============================================================================
// Terminal input
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    // Overlays take keyboard priority.
    if let Some(overlay) = &mut app.overlay {
        let overlay_update = overlay.handle_key(&app.tui.tasks, &mut app.tui.task_seq, key);
        match overlay_update.transition {
            OverlayTransition::Stay => {}
            OverlayTransition::Close => app.overlay = None,
            OverlayTransition::Open(request) => app.overlay = Some(Overlay::open(request)),
        }
        return overlay_update.effects;
    }

    match &mut app.tui.screen {
        Screen::Login(form) => {
            auth::update::handle_login_key(form, &app.tui.tasks, &mut app.tui.task_seq, key)
        }
        Screen::Signup(form) => {
            auth::update::handle_signup_key(form, &app.tui.tasks, &mut app.tui.task_seq, key)
        }
        Screen::Home => handle_home_key(app, key),
    }
}

fn handle_home_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Down | KeyCode::Char('j') => {
            app.tui.posts.select_next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.tui.posts.select_prev();
            vec![]
        }
        KeyCode::Enter => {
            if let Some(post) = app.tui.posts.selected_post() {
                app.overlay = Some(Overlay::open(OverlayRequest::ViewPost {
                    post: post.clone(),
                }));
            }
            vec![]
        }
        KeyCode::Char('n') => {
            app.overlay = Some(Overlay::open(OverlayRequest::NewPost));
            vec![]
        }
        KeyCode::Char('e') => {
            if let Some(post) = app.tui.posts.selected_post() {
                app.overlay = Some(Overlay::open(OverlayRequest::EditPost {
                    post: post.clone(),
                }));
            }
            vec![]
        }
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('r') => posts::update::refetch(&mut app.tui.posts, &mut app.tui.task_seq),
        KeyCode::Char('l') => {
            // Logout: drop the token, then re-enter navigation so the route
            // guard lands on a fresh login screen.
            vec![UiEffect::ClearToken, UiEffect::Navigate(Route::Login)]
        }
        _ => vec![],
    }
}

fn delete_selected(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.tasks.post_delete.is_running() {
        return vec![];
    }
    let Some(post) = app.tui.posts.selected_post() else {
        return vec![];
    };
    vec![UiEffect::DeletePost {
        task: app.tui.task_seq.next_id(),
        id: post.id.clone(),
    }]
}

// ============================================================================
// Navigation and the route guard
// ============================================================================

/// Applies a navigation request. The guard runs here: Home requires a
/// stored token and falls back to the login screen without one.
fn handle_navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    match route {
        Route::Home => {
            if app.tui.session.is_authenticated() {
                enter_home(app)
            } else {
                enter_login(app);
                vec![]
            }
        }
        Route::Login => {
            enter_login(app);
            vec![]
        }
        Route::Signup => {
            enter_signup(app);
            vec![]
        }
    }
}

/// Tears down the old screen and mounts Home: fresh list and profile
/// state, both fetches in flight.
fn enter_home(app: &mut AppState) -> Vec<UiEffect> {
    reset_screen_state(app);
    app.tui.screen = Screen::Home;

    let mut effects = posts::update::refetch(&mut app.tui.posts, &mut app.tui.task_seq);
    effects.push(UiEffect::FetchProfile {
        task: app.tui.task_seq.next_id(),
    });
    effects
}

fn enter_login(app: &mut AppState) {
    reset_screen_state(app);
    app.tui.screen = Screen::Login(LoginForm::default());
}

fn enter_signup(app: &mut AppState) {
    reset_screen_state(app);
    app.tui.screen = Screen::Signup(SignupForm::default());
}

/// Screen switches drop everything owned by the outgoing screen. In-flight
/// task results then fail the `finish_if_active` check and are discarded.
fn reset_screen_state(app: &mut AppState) {
    app.overlay = None;
    app.tui.tasks.reset(app.tui.task_seq.peek());
    app.tui.posts = crate::features::posts::PostsState::default();
    app.tui.profile = crate::features::profile::ProfileState::default();
}

// ============================================================================
// Async results
// ============================================================================

fn handle_auth_event(app: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginFinished(Ok(token)) => {
            // Persist before navigating: the guard reads the store.
            vec![
                UiEffect::PersistToken { token },
                UiEffect::Navigate(Route::Home),
            ]
        }
        AuthUiEvent::LoginFinished(Err(error)) => {
            if let Screen::Login(form) = &mut app.tui.screen {
                form.error = Some(error.message().to_string());
            }
            // A failed login invalidates whatever token was stored.
            vec![UiEffect::ClearToken]
        }
        AuthUiEvent::SignupFinished(Ok(())) => {
            app.tui.notices.success("Account created. Please log in.");
            vec![UiEffect::Navigate(Route::Login)]
        }
        AuthUiEvent::SignupFinished(Err(error)) => {
            if let Screen::Signup(form) = &mut app.tui.screen {
                form.error = Some(error.message().to_string());
            }
            vec![]
        }
    }
}

fn handle_profile_event(app: &mut AppState, event: ProfileUiEvent) -> Vec<UiEffect> {
    match event {
        ProfileUiEvent::Loaded(user) => {
            app.tui.profile.set_loaded(user);
        }
        ProfileUiEvent::Failed(message) => {
            // The panel keeps its placeholder; the list is unaffected.
            tracing::warn!("profile fetch failed: {message}");
            app.tui.notices.error(message);
        }
    }
    vec![]
}

fn handle_posts_ui_event(app: &mut AppState, event: PostsUiEvent) -> Vec<UiEffect> {
    match &event {
        PostsUiEvent::Saved { .. } => {
            // Success closes the editor; the refetch below repaints the list.
            app.overlay = None;
        }
        PostsUiEvent::SaveFailed(message) => {
            if let Some(editor) = app.overlay.as_mut().and_then(Overlay::as_editor_mut) {
                editor.set_save_error(message.clone());
            }
        }
        _ => {}
    }
    posts::update::handle_posts_event(
        &mut app.tui.posts,
        &mut app.tui.notices,
        &mut app.tui.task_seq,
        event,
    )
}

#[cfg(test)]
mod tests {
    use quill_core::api::ApiError;
    use quill_core::config::Config;
    use quill_core::session::SessionStore;
    use tempfile::TempDir;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
    use crate::features::posts::PostsPhase;
    use crate::features::profile::ProfilePhase;

    fn app_with_store() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at(dir.path().join("token"));
        (AppState::new(Config::default(), store), dir)
    }

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn navigate_home_without_token_lands_on_login() {
        let (mut app, _dir) = app_with_store();
        let effects = update(&mut app, UiEvent::Navigate(Route::Home));
        assert!(effects.is_empty());
        assert!(matches!(app.tui.screen, Screen::Login(_)));
    }

    #[test]
    fn navigate_home_with_token_fetches_posts_and_profile() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();

        let effects = update(&mut app, UiEvent::Navigate(Route::Home));
        assert!(matches!(app.tui.screen, Screen::Home));
        assert_eq!(app.tui.posts.phase, PostsPhase::Loading);
        assert!(matches!(effects[0], UiEffect::FetchPosts { .. }));
        assert!(matches!(effects[1], UiEffect::FetchProfile { .. }));
    }

    #[test]
    fn successful_login_persists_then_navigates() {
        let (mut app, _dir) = app_with_store();
        let effects = update(
            &mut app,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Ok("tok".to_string()))),
        );
        assert!(matches!(effects[0], UiEffect::PersistToken { .. }));
        assert!(matches!(effects[1], UiEffect::Navigate(Route::Home)));
    }

    #[test]
    fn failed_login_shows_error_and_clears_token() {
        let (mut app, _dir) = app_with_store();
        let effects = update(
            &mut app,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            )))),
        );
        assert!(matches!(effects[0], UiEffect::ClearToken));
        match &app.tui.screen {
            Screen::Login(form) => {
                assert_eq!(form.error.as_deref(), Some("Invalid email or password"));
            }
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn logout_clears_token_then_navigates_to_login() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));

        let effects = handle_home_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE),
        );
        assert!(matches!(effects[0], UiEffect::ClearToken));
        assert!(matches!(effects[1], UiEffect::Navigate(Route::Login)));
    }

    #[test]
    fn save_success_closes_editor_and_refetches() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));
        app.overlay = Some(Overlay::open(OverlayRequest::NewPost));

        let effects = update(
            &mut app,
            UiEvent::Posts(PostsUiEvent::Saved { created: true }),
        );
        assert!(app.overlay.is_none());
        assert!(matches!(effects[0], UiEffect::FetchPosts { .. }));
        assert_eq!(
            app.tui.notices.current().unwrap().text,
            "Blog created successfully!"
        );
    }

    #[test]
    fn save_failure_keeps_editor_open_with_inline_error() {
        let (mut app, _dir) = app_with_store();
        app.overlay = Some(Overlay::open(OverlayRequest::NewPost));

        let effects = update(
            &mut app,
            UiEvent::Posts(PostsUiEvent::SaveFailed("Image too large".to_string())),
        );
        assert!(effects.is_empty());
        let editor = app.overlay.as_mut().and_then(Overlay::as_editor_mut).unwrap();
        assert_eq!(editor.error.as_deref(), Some("Image too large"));
    }

    #[test]
    fn stale_task_result_is_dropped() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));

        // Fetch started under the old screen generation.
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::PostsFetch,
                started: TaskStarted { id: TaskId(0) },
            },
        );
        // Navigation resets task state before the result arrives.
        update(&mut app, UiEvent::Navigate(Route::Home));

        let effects = update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::PostsFetch,
                completed: TaskCompleted {
                    id: TaskId(0),
                    result: Box::new(UiEvent::Posts(PostsUiEvent::Listed(vec![]))),
                },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.tui.posts.phase, PostsPhase::Loading);
    }

    #[test]
    fn task_started_before_logout_cannot_rearm_after_reset() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));

        // Logout resets the screen while the fetch's start notification is
        // still queued behind it; its id predates the reset.
        update(&mut app, UiEvent::Navigate(Route::Login));
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::PostsFetch,
                started: TaskStarted { id: TaskId(0) },
            },
        );
        assert!(!app.tui.tasks.posts_fetch.is_running());

        let effects = update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::PostsFetch,
                completed: TaskCompleted {
                    id: TaskId(0),
                    result: Box::new(UiEvent::Posts(PostsUiEvent::Listed(vec![]))),
                },
            },
        );
        assert!(effects.is_empty());
        assert!(matches!(app.tui.screen, Screen::Login(_)));
        assert_eq!(app.tui.posts.phase, PostsPhase::Idle);
    }

    #[test]
    fn profile_failure_keeps_placeholder_and_raises_notice() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));

        let effects = update(
            &mut app,
            UiEvent::Profile(ProfileUiEvent::Failed("No token found".to_string())),
        );
        assert!(effects.is_empty());
        assert!(matches!(app.tui.profile.phase, ProfilePhase::Loading));
        assert_eq!(app.tui.notices.current().unwrap().text, "No token found");
    }

    #[test]
    fn delete_failure_surfaces_notice_without_refetch() {
        let (mut app, _dir) = app_with_store();
        let effects = update(
            &mut app,
            UiEvent::Posts(PostsUiEvent::DeleteFailed("boom".to_string())),
        );
        assert!(effects.is_empty());
        assert_eq!(
            app.tui.notices.current().unwrap().text,
            "Error deleting blog: boom"
        );
    }

    #[test]
    fn quit_keys_work_on_home() {
        let (mut app, _dir) = app_with_store();
        app.tui.session.set("tok").unwrap();
        update(&mut app, UiEvent::Navigate(Route::Home));
        let effects = update(&mut app, key_event(KeyCode::Char('q')));
        assert!(matches!(effects[0], UiEffect::Quit));
    }
}
