//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! - `editor.rs`: Create/edit post form (`n` or `e` on the home screen)
//! - `viewer.rs`: Read-only post dialog (`Enter` on a post)
//! - `render_utils.rs`: Shared rendering utilities for overlays

pub mod editor;
pub mod render_utils;
pub mod viewer;

use crossterm::event::KeyEvent;
pub use editor::{EditorMode, EditorState};
use quill_core::api::BlogPost;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use viewer::ViewerState;

use crate::common::{TaskSeq, Tasks};
use crate::effects::UiEffect;

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    NewPost,
    EditPost { post: BlogPost },
    ViewPost { post: BlogPost },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Editor(EditorState),
    Viewer(ViewerState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::NewPost => Overlay::Editor(EditorState::open_create()),
            OverlayRequest::EditPost { post } => Overlay::Editor(EditorState::open_edit(&post)),
            OverlayRequest::ViewPost { post } => Overlay::Viewer(ViewerState::open(post)),
        }
    }

    pub fn handle_key(
        &mut self,
        tasks: &Tasks,
        task_seq: &mut TaskSeq,
        key: KeyEvent,
    ) -> OverlayUpdate {
        match self {
            Overlay::Editor(e) => e.handle_key(tasks, task_seq, key),
            Overlay::Viewer(v) => v.handle_key(key),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        tasks: &Tasks,
        resolve_url: impl Fn(&str) -> String,
    ) {
        match self {
            Overlay::Editor(e) => e.render(frame, area, tasks.post_save.is_running(), resolve_url),
            Overlay::Viewer(v) => v.render(frame, area, resolve_url),
        }
    }

    pub fn as_editor_mut(&mut self) -> Option<&mut EditorState> {
        match self {
            Overlay::Editor(e) => Some(e),
            _ => None,
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        tasks: &Tasks,
        resolve_url: impl Fn(&str) -> String,
    );
}

impl OverlayExt for Option<Overlay> {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        tasks: &Tasks,
        resolve_url: impl Fn(&str) -> String,
    ) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tasks, resolve_url);
        }
    }
}
