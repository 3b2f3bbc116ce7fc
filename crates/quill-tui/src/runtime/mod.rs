//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results are collected through a single "inbox" channel:
//! - Handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//! - This eliminates per-operation receivers

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use quill_core::api::ApiClient;
use quill_core::config::Config;
use quill_core::session::SessionStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted, UiEventReceiver, UiEventSender};
use crate::effects::UiEffect;
use crate::events::{Route, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while anything is animating or in flight.
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(33);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Shared API client; cheap to clone into spawned tasks.
    client: ApiClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime: installs the panic hook, enters the
    /// alternate screen, and builds the initial state.
    pub fn new(config: Config, session: SessionStore) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let client = ApiClient::new(&config.api_base_url);
        let state = AppState::new(config, session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        // Initial navigation goes through the route guard: with a stored
        // token this lands on Home, otherwise on the login screen.
        self.dispatch_event(UiEvent::Navigate(Route::Home));

        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render; terminal events update state
                // but batch renders to the next Tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the terminal and the inbox, emitting Tick on
    /// cadence. Blocks up to one tick interval when nothing is pending.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast tick while tasks run (spinner), notices are live (expiry),
        // or the user is actively typing.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.notices.has_pending()
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle. Handlers are pure async functions returning `UiEvent`.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let started = TaskStarted { id };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect.
    ///
    /// Session writes happen inline, in order, before any following effect
    /// is executed: a `PersistToken` followed by `Navigate` must be visible
    /// to the route guard.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::Navigate(route) => {
                self.dispatch_event(UiEvent::Navigate(route));
            }
            UiEffect::PersistToken { token } => {
                if let Err(error) = self.state.tui.session.set(&token) {
                    tracing::error!("failed to persist session token: {error:#}");
                    self.state.tui.notices.error("Could not save session");
                }
            }
            UiEffect::ClearToken => {
                if let Err(error) = self.state.tui.session.clear() {
                    tracing::error!("failed to clear session token: {error:#}");
                }
            }
            UiEffect::Login {
                task,
                email,
                password,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Login, task, move || {
                    handlers::login(client, email, password)
                });
            }
            UiEffect::Signup {
                task,
                username,
                email,
                password,
                profile_image,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Signup, task, move || {
                    handlers::signup(client, username, email, password, profile_image)
                });
            }
            UiEffect::FetchProfile { task } => {
                let client = self.client.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(TaskKind::Profile, task, move || {
                    handlers::fetch_profile(client, session)
                });
            }
            UiEffect::FetchPosts { task } => {
                let client = self.client.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(TaskKind::PostsFetch, task, move || {
                    handlers::fetch_posts(client, session)
                });
            }
            UiEffect::CreatePost {
                task,
                title,
                description,
                image,
            } => {
                let client = self.client.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(TaskKind::PostSave, task, move || {
                    handlers::create_post(client, session, title, description, image)
                });
            }
            UiEffect::UpdatePost {
                task,
                id,
                title,
                description,
                image,
            } => {
                let client = self.client.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(TaskKind::PostSave, task, move || {
                    handlers::update_post(client, session, id, title, description, image)
                });
            }
            UiEffect::DeletePost { task, id } => {
                let client = self.client.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(TaskKind::PostDelete, task, move || {
                    handlers::delete_post(client, session, id)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
