//! Auth screens view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{LoginField, LoginForm, SignupField, SignupForm};

const FORM_WIDTH: u16 = 52;

pub fn render_login(form: &LoginForm, frame: &mut Frame, area: Rect, busy: bool) {
    let panel = centered_panel(area, FORM_WIDTH, 11);
    render_panel_block(frame, panel, "Login");

    let inner = panel_inner(panel);
    let mut lines = vec![Line::default()];
    lines.push(field_line(
        "Email",
        &form.email,
        form.focus == LoginField::Email,
        false,
    ));
    lines.push(Line::default());
    lines.push(field_line(
        "Password",
        &form.password,
        form.focus == LoginField::Password,
        true,
    ));
    lines.push(Line::default());
    lines.push(status_line(form.error.as_deref(), busy, "Logging in..."));
    lines.push(Line::default());
    lines.push(hint_line(&[
        ("Enter", "login"),
        ("Tab", "next field"),
        ("Ctrl+S", "sign up"),
        ("Esc", "quit"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_signup(form: &SignupForm, frame: &mut Frame, area: Rect, busy: bool) {
    let panel = centered_panel(area, FORM_WIDTH, 15);
    render_panel_block(frame, panel, "Sign Up");

    let inner = panel_inner(panel);
    let mut lines = vec![Line::default()];
    lines.push(field_line(
        "Username",
        &form.username,
        form.focus == SignupField::Username,
        false,
    ));
    lines.push(Line::default());
    lines.push(field_line(
        "Email",
        &form.email,
        form.focus == SignupField::Email,
        false,
    ));
    lines.push(Line::default());
    lines.push(field_line(
        "Password",
        &form.password,
        form.focus == SignupField::Password,
        true,
    ));
    lines.push(Line::default());
    lines.push(field_line(
        "Avatar (path, optional)",
        &form.image_path,
        form.focus == SignupField::ProfileImage,
        false,
    ));
    lines.push(Line::default());
    lines.push(status_line(form.error.as_deref(), busy, "Signing up..."));
    lines.push(Line::default());
    lines.push(hint_line(&[
        ("Enter", "sign up"),
        ("Tab", "next field"),
        ("Esc", "back to login"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_panel(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

fn render_panel_block(frame: &mut Frame, panel: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan),
        )))
        .title_alignment(Alignment::Center);
    frame.render_widget(block, panel);
}

fn panel_inner(panel: Rect) -> Rect {
    Rect::new(
        panel.x + 2,
        panel.y + 1,
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    )
}

fn field_line(label: &str, value: &str, focused: bool, masked: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(shown, value_style),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn status_line(error: Option<&str>, busy: bool, busy_text: &str) -> Line<'static> {
    if busy {
        Line::from(Span::styled(
            busy_text.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = error {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::default()
    }
}

pub(crate) fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}
