//! Utility functions for rendering UI components

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, List, ListItem, ListState},
};

/// Glyph standing in for an album thumbnail.
pub const THUMB: &str = "▣";

const THUMB_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Style for a thumbnail cell, colored deterministically from the album id
/// so the same album always shows the same swatch.
pub fn thumb_style(album_id: &str) -> Style {
    let hash = album_id
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
            (acc ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        });
    Style::default().fg(THUMB_PALETTE[(hash % THUMB_PALETTE.len() as u64) as usize])
}

/// A `width` x `height` rect centered in `area`, clamped to leave a margin.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    // Row styles already carry the highlight; the stateful render only keeps
    // the selected row scrolled into view.
    let mut state = ListState::default().with_selected(Some(selected_index));
    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Width of the number column for a listing of `item_count` rows.
pub fn calculate_num_width(item_count: usize) -> usize {
    item_count.checked_ilog10().map_or(2, |d| d as usize + 2)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return format!("{s:<max_width$}");
    }
    let head: String = s.chars().take(max_width.saturating_sub(3)).collect();
    format!("{:<max_width$}", format!("{head}..."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_as_minutes_and_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(562), "9:22");
    }

    #[test]
    fn num_width_grows_with_the_listing() {
        assert_eq!(calculate_num_width(0), 2);
        assert_eq!(calculate_num_width(9), 2);
        assert_eq!(calculate_num_width(10), 3);
        assert_eq!(calculate_num_width(120), 4);
    }

    #[test]
    fn truncation_pads_and_ellipsizes() {
        assert_eq!(truncate_string("So What", 10), "So What   ");
        assert_eq!(truncate_string("Freddie Freeloader", 10), "Freddie...");
    }

    #[test]
    fn thumb_style_is_stable_per_album() {
        assert_eq!(thumb_style("a1"), thumb_style("a1"));
    }

    #[test]
    fn centered_rect_respects_the_area_origin() {
        let area = Rect {
            x: 10,
            y: 5,
            width: 40,
            height: 20,
        };
        assert_eq!(
            centered_rect(20, 10, area),
            Rect {
                x: 20,
                y: 10,
                width: 20,
                height: 10,
            }
        );
    }
}
