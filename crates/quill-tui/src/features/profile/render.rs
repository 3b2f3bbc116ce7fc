use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{ProfilePhase, ProfileState};

pub fn render_profile(profile: &ProfileState, frame: &mut Frame, area: Rect, avatar_url: Option<&str>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(Span::styled(
            " Profile ",
            Style::default().fg(Color::White),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &profile.phase {
        ProfilePhase::Loading => vec![
            Line::default(),
            Line::from(Span::styled(
                "Loading profile...",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        ProfilePhase::Loaded(user) => {
            let mut lines = vec![
                Line::default(),
                labeled("Username", &user.username),
                labeled("Email", &user.email),
            ];
            if let Some(url) = avatar_url {
                lines.push(labeled("Avatar", url));
            }
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn labeled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}
