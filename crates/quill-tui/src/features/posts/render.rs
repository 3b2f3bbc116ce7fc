//! Post list view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::{PostsPhase, PostsState};
use crate::common::truncate_end_with_ellipsis;

pub fn render_posts(posts: &PostsState, frame: &mut Frame, area: Rect, spinner: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(Span::styled(
            " Latest Posts ",
            Style::default().fg(Color::White),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match posts.phase {
        PostsPhase::Idle => vec![Line::default()],
        PostsPhase::Loading => vec![
            Line::default(),
            Line::from(vec![
                Span::styled(spinner.to_string(), Style::default().fg(Color::Yellow)),
                Span::styled(" Loading posts...", Style::default().fg(Color::Yellow)),
            ]),
        ],
        PostsPhase::Error => vec![
            Line::default(),
            Line::from(Span::styled(
                "Could not load posts.",
                Style::default().fg(Color::Red),
            )),
        ],
        PostsPhase::Loaded if posts.posts.is_empty() => vec![
            Line::default(),
            Line::from(Span::styled(
                "No posts yet. Press n to write the first one.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        PostsPhase::Loaded => post_lines(posts, inner.width as usize, inner.height as usize),
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

/// One row per post: title, author, date. Server order, scrolled so the
/// selection stays visible.
fn post_lines(posts: &PostsState, width: usize, height: usize) -> Vec<Line<'static>> {
    let visible = height.max(1);
    let first = posts.selected.saturating_sub(visible.saturating_sub(1));

    posts
        .posts
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, post)| {
            let selected = i == posts.selected;
            let marker = if selected { "> " } else { "  " };
            let author = post
                .author
                .as_ref()
                .map_or("unknown", |a| a.username.as_str());
            let date = post.created_at.format("%Y-%m-%d").to_string();
            let suffix = format!("  {author}  {date}");
            let title = truncate_end_with_ellipsis(
                &post.title,
                width.saturating_sub(marker.width() + suffix.width()),
            );

            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
                Span::styled(title, title_style),
                Span::styled(suffix, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}
