//! Overlay rendering (error notification, help popup)

use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::UiState;

use super::utils::centered_rect;

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(msg) = ui_state.error_message.as_deref() else {
        return;
    };
    let area = frame.area();

    // Fixed width; the message wraps over as many lines as it needs.
    let popup_width = 52.min(area.width.saturating_sub(4));
    let text_width = popup_width.saturating_sub(4).max(1) as usize;
    let text_lines = msg.chars().count().div_ceil(text_width).max(1) as u16;
    let popup_area = centered_rect(popup_width, text_lines + 2, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(msg.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(error_widget, popup_area);
}

// (key, action); an empty key marks a section header row.
const HELP_ROWS: &[(&str, &str)] = &[
    ("", "── Search ──"),
    ("any character", "Edit query, search as you type"),
    ("Esc", "Clear query"),
    ("Enter", "Jump to results"),
    ("", ""),
    ("", "── Results ──"),
    ("↑ / ↓", "Move selection"),
    ("Enter", "Open album"),
    ("← / Backspace", "History back"),
    ("→", "History forward"),
    ("", ""),
    ("", "── General ──"),
    ("Tab / Shift+Tab", "Cycle sections"),
    ("/", "Focus search"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];

pub fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect(56, HELP_ROWS.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|&(key, action)| match key {
            "" => Line::from(Span::styled(
                format!("{action:^34}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            key => Line::from(vec![
                Span::styled(
                    format!("{key:>16}"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(action, Style::default().fg(Color::White)),
            ]),
        })
        .collect();

    let help_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (H or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(help_widget, popup_area);
}
