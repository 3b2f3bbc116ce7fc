//! Read-only post dialog.

use crossterm::event::{KeyCode, KeyEvent};
use quill_core::api::BlogPost;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{OverlayRequest, OverlayUpdate};
use crate::common::truncate_end_with_ellipsis;

/// State for the post viewer overlay.
#[derive(Debug)]
pub struct ViewerState {
    pub post: BlogPost,
    pub scroll: u16,
}

impl ViewerState {
    pub fn open(post: BlogPost) -> Self {
        Self { post, scroll: 0 }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Char('e') => OverlayUpdate::open(OverlayRequest::EditPost {
                post: self.post.clone(),
            }),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                OverlayUpdate::stay()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, resolve_url: impl Fn(&str) -> String) {
        use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};

        let hints = [
            InputHint::new("e", "edit"),
            InputHint::new("j/k", "scroll"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Post",
                border_color: Color::Cyan,
                width: 70,
                height: 18,
                hints: &hints,
            },
        );
        let body = layout.body;
        let width = body.width as usize;

        let author = self
            .post
            .author
            .as_ref()
            .map_or("unknown", |a| a.username.as_str());
        let byline = format!(
            "{author} · {}",
            self.post.created_at.format("%Y-%m-%d %H:%M")
        );

        let lines = vec![
            Line::from(Span::styled(
                truncate_end_with_ellipsis(&self.post.title, width),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                truncate_end_with_ellipsis(&byline, width),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                truncate_end_with_ellipsis(&resolve_url(&self.post.image_url), width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines),
            Rect::new(body.x, body.y, body.width, 3),
        );
        render_separator(frame, body, 3);

        let text_area = Rect::new(
            body.x,
            body.y + 4,
            body.width,
            body.height.saturating_sub(4),
        );
        let description = Paragraph::new(self.post.description.as_str())
            .style(Style::default().fg(Color::Gray))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(description, text_area);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::overlays::OverlayTransition;

    fn post() -> BlogPost {
        BlogPost {
            id: "65a1".to_string(),
            title: "Hello".to_string(),
            description: "World".to_string(),
            image_url: "uploads/hello.png".to_string(),
            author: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn edit_key_requests_the_editor() {
        let mut viewer = ViewerState::open(post());
        let update = viewer.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        match update.transition {
            OverlayTransition::Open(OverlayRequest::EditPost { post }) => {
                assert_eq!(post.id, "65a1");
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn escape_closes() {
        let mut viewer = ViewerState::open(post());
        let update = viewer.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Close));
    }
}
