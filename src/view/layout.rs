//! Layout rendering (top bar, hint line)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::model::{ActiveSection, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, location: &(String, String)) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(36), // Current location
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if search_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if search_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    let (title, url) = location;
    let location_line = Line::from(vec![
        Span::styled(title.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(url.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    let location = Paragraph::new(location_line)
        .block(Block::default().borders(Borders::ALL).title(" Location "));
    frame.render_widget(location, chunks[1]);
}

pub fn render_hint_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints = match ui_state.active_section {
        ActiveSection::Search => "Type to search   Tab results   Ctrl+Q quit",
        ActiveSection::MainContent => {
            "↑/↓ select   Enter open   ←/Backspace back   → forward   / search   h help   q quit"
        }
    };
    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}
