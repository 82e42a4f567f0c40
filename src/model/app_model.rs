//! Main application model with state management

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;

use super::content::{AlbumDetail, ContentState, ContentView, SearchResults};
use super::library_client::LibraryClient;
use super::navigation::NavigationBridge;
use super::types::{ActiveSection, SelectedItem, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub client: Option<LibraryClient>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub navigation: NavigationBridge,
    pub should_quit: Arc<Mutex<bool>>,
    /// Latest issued search sequence number. A search result may only be
    /// applied while its captured sequence still equals this value, so a
    /// superseded query's late result never overwrites a newer one.
    search_seq: Arc<AtomicU64>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            client: None,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            navigation: NavigationBridge::new(),
            should_quit: Arc::new(Mutex::new(false)),
            search_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_client(&mut self, client: LibraryClient) {
        self.client = Some(client);
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn set_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) -> String {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
        state.search_query.clone()
    }

    pub async fn backspace_search(&self) -> String {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
        state.search_query.clone()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Content state
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        let mut state = self.content_state.lock().await;
        state.is_loading = loading;
    }

    pub async fn clear_content(&self) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::Empty;
        state.is_loading = false;
    }

    /// Issue a new search sequence number, invalidating every search still
    /// in flight.
    pub fn begin_search(&self) -> u64 {
        self.search_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a search issued with `seq` has been superseded by a newer one.
    pub fn search_superseded(&self, seq: u64) -> bool {
        self.search_seq.load(Ordering::SeqCst) != seq
    }

    /// Apply a finished search, unless a newer search was issued meanwhile.
    /// Returns whether the results were taken.
    pub async fn apply_search_results(&self, seq: u64, results: SearchResults) -> bool {
        if self.search_superseded(seq) {
            return false;
        }
        let mut state = self.content_state.lock().await;
        state.view = ContentView::SearchResults {
            results,
            selected: 0,
        };
        state.is_loading = false;
        true
    }

    pub async fn set_album_detail(&self, detail: AlbumDetail) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::AlbumDetail {
            detail,
            selected: 0,
        };
        state.is_loading = false;
    }

    pub async fn content_move_up(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::SearchResults { selected, .. }
            | ContentView::AlbumDetail { selected, .. } => {
                if *selected > 0 {
                    *selected -= 1;
                }
            }
            ContentView::Empty => {}
        }
    }

    pub async fn content_move_down(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::SearchResults { results, selected } => {
                if *selected < results.selectable_len().saturating_sub(1) {
                    *selected += 1;
                }
            }
            ContentView::AlbumDetail { detail, selected } => {
                if *selected < detail.tracks.len().saturating_sub(1) {
                    *selected += 1;
                }
            }
            ContentView::Empty => {}
        }
    }

    pub async fn get_selected_content_item(&self) -> Option<SelectedItem> {
        let state = self.content_state.lock().await;
        match &state.view {
            ContentView::SearchResults { results, selected } => results.item_at(*selected),
            // Album tracks have no further view to open.
            ContentView::AlbumDetail { .. } | ContentView::Empty => None,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{SearchAlbum, SearchTrack};

    fn results_with_albums(titles: &[&str]) -> SearchResults {
        SearchResults {
            albums: titles
                .iter()
                .map(|t| SearchAlbum {
                    id: format!("id-{t}"),
                    title: t.to_string(),
                    artist: "X".to_string(),
                    date: "2020-01-01".to_string(),
                })
                .collect(),
            ..SearchResults::default()
        }
    }

    #[tokio::test]
    async fn stale_search_results_are_dropped() {
        let model = AppModel::new();

        // Search X issued first, then Y supersedes it.
        let seq_x = model.begin_search();
        let seq_y = model.begin_search();

        // Y resolves first and is applied.
        assert!(model.apply_search_results(seq_y, results_with_albums(&["Y"])).await);
        // X resolves afterwards and must be ignored.
        assert!(!model.apply_search_results(seq_x, results_with_albums(&["X"])).await);

        let state = model.get_content_state().await;
        match state.view {
            ContentView::SearchResults { results, .. } => {
                assert_eq!(results.albums[0].title, "Y");
            }
            other => panic!("expected search results, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn applying_results_clears_the_loading_flag() {
        let model = AppModel::new();
        model.set_content_loading(true).await;

        let seq = model.begin_search();
        assert!(model.apply_search_results(seq, results_with_albums(&["A"])).await);
        assert!(!model.get_content_state().await.is_loading);
    }

    #[tokio::test]
    async fn selection_clamps_to_the_listing() {
        let model = AppModel::new();
        let seq = model.begin_search();
        let mut results = results_with_albums(&["A", "B"]);
        results.tracks.push(SearchTrack {
            title: "T".to_string(),
            artist: "X".to_string(),
            album_id: "id-A".to_string(),
            album: "A".to_string(),
        });
        model.apply_search_results(seq, results).await;

        model.content_move_up().await; // already at the top
        for _ in 0..10 {
            model.content_move_down().await;
        }

        match model.get_content_state().await.view {
            ContentView::SearchResults { selected, .. } => assert_eq!(selected, 2),
            other => panic!("expected search results, got {other:?}"),
        }
        // The last selectable row is the track.
        assert!(matches!(
            model.get_selected_content_item().await,
            Some(SelectedItem::Track { .. })
        ));
    }
}
