//! Top-level frame composition.
//!
//! Renders the current screen, the notice line, and any active overlay on
//! top. Pure: reads state, never mutates it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::NoticeLevel;
use crate::features::auth::{render_login, render_signup};
use crate::features::auth::render::hint_line;
use crate::features::posts::render_posts;
use crate::features::profile::render_profile;
use crate::overlays::OverlayExt;
use crate::state::{AppState, Screen};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let spinner = SPINNER_FRAMES[app.tui.spinner_frame % SPINNER_FRAMES.len()];

    // Bottom row is reserved for notices.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let body = rows[0];
    let notice_area = rows[1];

    match &app.tui.screen {
        Screen::Login(form) => {
            render_login(form, frame, body, app.tui.tasks.login.is_running());
        }
        Screen::Signup(form) => {
            render_signup(form, frame, body, app.tui.tasks.signup.is_running());
        }
        Screen::Home => render_home(app, frame, body, spinner),
    }

    render_notice_line(app, frame, notice_area);

    app.overlay
        .render(frame, body, &app.tui.tasks, |relative| {
            app.tui.resolve_image_url(relative)
        });
}

fn render_home(app: &AppState, frame: &mut Frame, area: Rect, spinner: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[0]);

    render_posts(&app.tui.posts, frame, columns[0], spinner);

    let avatar_url = app
        .tui
        .profile
        .user()
        .and_then(|user| user.profile_image.as_deref())
        .map(|relative| app.tui.resolve_image_url(relative));
    render_profile(&app.tui.profile, frame, columns[1], avatar_url.as_deref());

    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("j/k", "move"),
            ("Enter", "view"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "refresh"),
            ("l", "logout"),
            ("q", "quit"),
        ])),
        rows[1],
    );
}

fn render_notice_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let Some(notice) = app.tui.notices.current() else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color),
        ))),
        area,
    );
}
