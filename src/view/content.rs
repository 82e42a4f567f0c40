//! Main content area rendering (grouped search results, album detail)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
};

use crate::model::{
    ActiveSection, AlbumDetail, ContentState, ContentView, SearchAlbum, SearchArtist,
    SearchResults, SearchTrack, UiState,
};

use super::utils::{
    THUMB, calculate_num_width, format_duration, render_scrollable_list, thumb_style,
    truncate_string,
};

/// One display row of the grouped search listing.
///
/// Headings are display-only; they sit between the selectable item rows and
/// are skipped by the selection cursor.
pub enum SearchRow<'a> {
    Heading(&'static str),
    Artist(&'a SearchArtist),
    Album(&'a SearchAlbum),
    Track(&'a SearchTrack),
}

/// Build the grouped listing: for each non-empty group, in fixed order, a
/// heading followed by the group's rows. Empty groups contribute nothing.
pub fn search_rows(results: &SearchResults) -> Vec<SearchRow<'_>> {
    let mut rows = Vec::new();
    if !results.artists.is_empty() {
        rows.push(SearchRow::Heading("Artists"));
        rows.extend(results.artists.iter().map(SearchRow::Artist));
    }
    if !results.albums.is_empty() {
        rows.push(SearchRow::Heading("Albums"));
        rows.extend(results.albums.iter().map(SearchRow::Album));
    }
    if !results.tracks.is_empty() {
        rows.push(SearchRow::Heading("Tracks"));
        rows.extend(results.tracks.iter().map(SearchRow::Track));
    }
    rows
}

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if content_state.is_loading {
        let loading = Paragraph::new("Searching...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Empty => {
            let content = Paragraph::new(
                "Type to search the library\n\nUse Tab to switch between search and results\nUse ↑/↓ to select, Enter to open an album\nUse ←/→ to move through history",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
            frame.render_widget(content, area);
        }
        ContentView::SearchResults { results, selected } => {
            render_search_results(frame, area, results, *selected, is_focused);
        }
        ContentView::AlbumDetail { detail, selected } => {
            render_album_detail(frame, area, detail, *selected, is_focused);
        }
    }
}

fn render_search_results(
    frame: &mut Frame,
    area: Rect,
    results: &SearchResults,
    selected: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    if results.is_empty() {
        let empty = Paragraph::new("  No matches")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();
    let mut selectable_index = 0usize;
    let mut selected_display = 0usize;

    for row in search_rows(results) {
        match row {
            SearchRow::Heading(heading) => {
                items.push(
                    ListItem::new(Line::from(heading)).style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
            SearchRow::Artist(artist) => {
                let highlighted = selectable_index == selected;
                if highlighted {
                    selected_display = items.len();
                }
                items.push(
                    ListItem::new(artist_line(artist))
                        .style(item_style(highlighted, is_focused)),
                );
                selectable_index += 1;
            }
            SearchRow::Album(album) => {
                let highlighted = selectable_index == selected;
                if highlighted {
                    selected_display = items.len();
                }
                items.push(
                    ListItem::new(album_line(album)).style(item_style(highlighted, is_focused)),
                );
                selectable_index += 1;
            }
            SearchRow::Track(track) => {
                let highlighted = selectable_index == selected;
                if highlighted {
                    selected_display = items.len();
                }
                items.push(
                    ListItem::new(track_line(track)).style(item_style(highlighted, is_focused)),
                );
                selectable_index += 1;
            }
        }
    }

    render_scrollable_list(frame, area, items, selected_display, block);
}

fn item_style(highlighted: bool, is_focused: bool) -> Style {
    if highlighted && is_focused {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Artist row: name plus one thumbnail cell per album.
fn artist_line(artist: &SearchArtist) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("  {}  ", artist.name))];
    for album_id in &artist.albums {
        spans.push(Span::styled(THUMB, thumb_style(album_id)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Album row: thumbnail, title, artist, release year.
fn album_line(album: &SearchAlbum) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(THUMB, thumb_style(&album.id)),
        Span::raw(format!(" {}", album.title)),
        Span::styled(
            format!(" by {}", album.artist),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {}", album.release_year()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Track row: the album's thumbnail, title, artist.
fn track_line(track: &SearchTrack) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(THUMB, thumb_style(&track.album_id)),
        Span::raw(format!(" {}", track.title)),
        Span::styled(
            format!("  {}", track.artist),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_album_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &AlbumDetail,
    selected: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", detail.title))
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    let num_width = calculate_num_width(detail.tracks.len());
    let title_width = (area.width as usize).saturating_sub(num_width + 14).max(8);

    let mut items = vec![
        ListItem::new(Line::from(vec![
            Span::styled(THUMB, thumb_style(&detail.id)),
            Span::raw(format!(" by {}", detail.artist)),
            Span::styled(
                format!("  {}", detail.release_year()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        ListItem::new(""),
    ];

    let header_rows = items.len();
    items.extend(detail.tracks.iter().enumerate().map(|(i, track)| {
        let style = item_style(i == selected, is_focused);
        ListItem::new(format!(
            "{:>num_width$}  {}  {:>6}",
            track.number,
            truncate_string(&track.title, title_width),
            format_duration(track.duration_seconds),
        ))
        .style(style)
    }));

    render_scrollable_list(frame, area, items, header_rows + selected, block);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of_blue() -> SearchAlbum {
        SearchAlbum {
            id: "a1".to_string(),
            title: "Kind of Blue".to_string(),
            artist: "Miles Davis".to_string(),
            date: "1959-08-17".to_string(),
        }
    }

    fn headings(rows: &[SearchRow]) -> Vec<&'static str> {
        rows.iter()
            .filter_map(|row| match row {
                SearchRow::Heading(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_results_render_no_rows() {
        assert!(search_rows(&SearchResults::default()).is_empty());
    }

    #[test]
    fn single_group_renders_single_heading() {
        let results = SearchResults {
            albums: vec![kind_of_blue()],
            ..SearchResults::default()
        };

        let rows = search_rows(&results);
        assert_eq!(rows.len(), 2);
        assert_eq!(headings(&rows), vec!["Albums"]);
    }

    #[test]
    fn groups_appear_in_fixed_order() {
        let results = SearchResults {
            artists: vec![SearchArtist {
                name: "Miles Davis".to_string(),
                albums: vec!["a1".to_string()],
            }],
            albums: vec![kind_of_blue()],
            tracks: vec![SearchTrack {
                title: "So What".to_string(),
                artist: "Miles Davis".to_string(),
                album_id: "a1".to_string(),
                album: "Kind of Blue".to_string(),
            }],
        };

        assert_eq!(
            headings(&search_rows(&results)),
            vec!["Artists", "Albums", "Tracks"]
        );
    }

    #[test]
    fn album_row_shows_title_artist_and_year() {
        let text = album_line(&kind_of_blue()).to_string();
        assert!(text.contains("Kind of Blue"));
        assert!(text.contains("by Miles Davis"));
        assert!(text.contains("1959"));
        assert!(!text.contains("1959-08"));
    }

    #[test]
    fn artist_row_shows_one_thumb_per_album() {
        let artist = SearchArtist {
            name: "Miles Davis".to_string(),
            albums: vec!["a1".to_string(), "a2".to_string(), "a3".to_string()],
        };
        let text = artist_line(&artist).to_string();
        assert!(text.contains("Miles Davis"));
        assert_eq!(text.matches(THUMB).count(), 3);
    }

    #[test]
    fn track_row_shows_title_and_artist() {
        let track = SearchTrack {
            title: "So What".to_string(),
            artist: "Miles Davis".to_string(),
            album_id: "a1".to_string(),
            album: "Kind of Blue".to_string(),
        };
        let text = track_line(&track).to_string();
        assert!(text.contains("So What"));
        assert!(text.contains("Miles Davis"));
    }
}
