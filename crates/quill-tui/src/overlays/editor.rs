//! Post editor overlay, shared by the create and edit flows.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quill_core::api::{image_file_size, validate_image_path};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::common::{Tasks, TaskSeq, format_bytes, truncate_end_with_ellipsis};
use crate::effects::UiEffect;

/// The server stores at most this many characters of description; extra
/// input is refused rather than silently trimmed at submit time.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit {
        id: String,
        /// Image already on the server, shown when no replacement is picked.
        current_image_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    Description,
    Image,
}

/// State for the post editor overlay.
#[derive(Debug)]
pub struct EditorState {
    pub mode: EditorMode,
    pub title: String,
    pub description: String,
    /// Path typed by the user; empty means "no image picked".
    pub image_path: String,
    pub focus: EditorField,
    pub error: Option<String>,
}

impl EditorState {
    pub fn open_create() -> Self {
        Self {
            mode: EditorMode::Create,
            title: String::new(),
            description: String::new(),
            image_path: String::new(),
            focus: EditorField::Title,
            error: None,
        }
    }

    /// Opens the editor prefilled from an existing post. The image field
    /// starts empty; leaving it empty keeps the server-side image.
    pub fn open_edit(post: &quill_core::api::BlogPost) -> Self {
        Self {
            mode: EditorMode::Edit {
                id: post.id.clone(),
                current_image_url: post.image_url.clone(),
            },
            title: post.title.clone(),
            description: post.description.chars().take(DESCRIPTION_MAX_CHARS).collect(),
            image_path: String::new(),
            focus: EditorField::Title,
            error: None,
        }
    }

    pub fn is_create(&self) -> bool {
        self.mode == EditorMode::Create
    }

    /// Sets the inline error shown when the save round-trip fails. The
    /// overlay stays open so the draft is not lost.
    pub fn set_save_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn handle_key(
        &mut self,
        tasks: &Tasks,
        task_seq: &mut TaskSeq,
        key: KeyEvent,
    ) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Clear error on any edit
        if !matches!(key.code, KeyCode::Esc) && !(ctrl && key.code == KeyCode::Char('s')) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('s') if ctrl => self.submit(tasks, task_seq),
            KeyCode::Tab => {
                self.focus_next();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab => {
                self.focus_prev();
                OverlayUpdate::stay()
            }
            KeyCode::Enter if self.focus == EditorField::Description => {
                self.push_description('\n');
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                self.focus_next();
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.field_mut().pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                if self.focus == EditorField::Description {
                    self.push_description(c);
                } else {
                    self.field_mut().push(c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn submit(&mut self, tasks: &Tasks, task_seq: &mut TaskSeq) -> OverlayUpdate {
        if tasks.post_save.is_running() {
            return OverlayUpdate::stay();
        }
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            self.error = Some("Title and description are required".to_string());
            return OverlayUpdate::stay();
        }

        let image = if self.image_path.trim().is_empty() {
            if self.is_create() {
                self.error = Some("Please upload an image".to_string());
                return OverlayUpdate::stay();
            }
            None
        } else {
            match validate_image_path(Path::new(self.image_path.trim())) {
                Ok(path) => Some(path),
                Err(message) => {
                    self.error = Some(message);
                    return OverlayUpdate::stay();
                }
            }
        };

        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let effect = match &self.mode {
            EditorMode::Create => UiEffect::CreatePost {
                task: task_seq.next_id(),
                title,
                description,
                // Checked above: create always has an image.
                image: image.unwrap_or_default(),
            },
            EditorMode::Edit { id, .. } => UiEffect::UpdatePost {
                task: task_seq.next_id(),
                id: id.clone(),
                title,
                description,
                image,
            },
        };

        // Stays open until the save result comes back; success closes it,
        // failure surfaces inline via `set_save_error`.
        OverlayUpdate::stay().with_ui_effects(vec![effect])
    }

    fn push_description(&mut self, c: char) {
        if self.description.chars().count() < DESCRIPTION_MAX_CHARS {
            self.description.push(c);
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            EditorField::Title => &mut self.title,
            EditorField::Description => &mut self.description,
            EditorField::Image => &mut self.image_path,
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            EditorField::Title => EditorField::Description,
            EditorField::Description => EditorField::Image,
            EditorField::Image => EditorField::Title,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            EditorField::Title => EditorField::Image,
            EditorField::Description => EditorField::Title,
            EditorField::Image => EditorField::Description,
        };
    }

    /// Preview line under the image field: picked file name and size, or
    /// the image already on the server when editing without a replacement.
    fn image_preview(&self, resolve_url: impl Fn(&str) -> String) -> Option<String> {
        let typed = self.image_path.trim();
        if !typed.is_empty() {
            let path = PathBuf::from(typed);
            let name = path
                .file_name()
                .map_or_else(|| typed.to_string(), |n| n.to_string_lossy().into_owned());
            return Some(match image_file_size(&path) {
                Some(size) => format!("{name} ({})", format_bytes(size)),
                None => name,
            });
        }
        match &self.mode {
            EditorMode::Create => None,
            EditorMode::Edit {
                current_image_url, ..
            } => Some(format!("current: {}", resolve_url(current_image_url))),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        saving: bool,
        resolve_url: impl Fn(&str) -> String,
    ) {
        use super::render_utils::{
            InputHint, InputLine, OverlayConfig, render_input_line, render_overlay,
            render_separator,
        };

        let title = if self.is_create() {
            "New Post"
        } else {
            "Edit Post"
        };
        let hints = [
            InputHint::new("Ctrl+S", "save"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title,
                border_color: Color::Yellow,
                width: 64,
                height: 16,
                hints: &hints,
            },
        );
        let body = layout.body;

        render_input_line(
            frame,
            Rect::new(body.x, body.y, body.width, 1),
            &InputLine {
                value: &self.title,
                placeholder: Some("Title"),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color: Color::Yellow,
                focused: self.focus == EditorField::Title,
            },
        );
        render_separator(frame, body, 1);

        self.render_description(frame, Rect::new(body.x, body.y + 2, body.width, 6));
        render_separator(frame, body, 8);

        render_input_line(
            frame,
            Rect::new(body.x, body.y + 9, body.width, 1),
            &InputLine {
                value: &self.image_path,
                placeholder: Some(if self.is_create() {
                    "Image path"
                } else {
                    "Image path (empty keeps current)"
                }),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color: Color::Yellow,
                focused: self.focus == EditorField::Image,
            },
        );

        let preview = self.image_preview(resolve_url);
        if let Some(preview) = preview {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    truncate_end_with_ellipsis(&preview, body.width as usize),
                    Style::default().fg(Color::DarkGray),
                ))),
                Rect::new(body.x, body.y + 10, body.width, 1),
            );
        }

        let status = if saving {
            Line::from(Span::styled(
                "Saving...",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(error) = &self.error {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::default()
        };
        frame.render_widget(
            Paragraph::new(status),
            Rect::new(body.x, body.y + 11, body.width, 1),
        );
    }

    fn render_description(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == EditorField::Description;
        let mut lines: Vec<Line> = Vec::new();
        let visible = area.height.saturating_sub(1) as usize;
        let all: Vec<&str> = self.description.split('\n').collect();
        let first = all.len().saturating_sub(visible.max(1));
        for (i, text) in all[first..].iter().enumerate() {
            let last = first + i == all.len() - 1;
            let mut spans = vec![Span::styled(
                truncate_end_with_ellipsis(text, area.width.saturating_sub(2) as usize),
                Style::default().fg(if focused { Color::White } else { Color::Gray }),
            )];
            if focused && last {
                spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            }
            lines.push(Line::from(spans));
        }
        if self.description.is_empty() {
            lines = vec![Line::from(vec![
                if focused {
                    Span::styled("█", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("")
                },
                Span::styled("Description", Style::default().fg(Color::DarkGray)),
            ])];
        }

        let counter = format!(
            "{}/{DESCRIPTION_MAX_CHARS}",
            self.description.chars().count()
        );
        while lines.len() < visible {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            counter,
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), area);
    }
}
