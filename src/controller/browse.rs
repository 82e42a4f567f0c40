//! Search and album browsing controller methods

use crate::model::{ActiveSection, NavEntry, SelectedItem};

use super::AppController;

impl AppController {
    /// React to an edit of the search box; `query` is the box's new text and
    /// `seq` the sequence number allocated for this edit.
    ///
    /// The key handler allocates a fresh sequence per edit, so whatever is
    /// still in flight for the previous text can no longer be applied.
    pub async fn search_changed(&self, query: String, seq: u64) {
        if query.is_empty() {
            // Drop back to the empty view without a server round-trip; the
            // sequence allocated for this edit already invalidated whatever
            // was in flight.
            let model = self.model.lock().await;
            model.clear_content().await;
            if matches!(model.navigation.current_entry().await, NavEntry::Search { .. }) {
                model.navigation.replace(NavEntry::Home, "Library", "/").await;
            }
            return;
        }

        self.run_search(query, seq, true).await;
    }

    /// Issue the search allocated as `seq` and, if its result is still
    /// current when it resolves, render it. `update_history` is false when
    /// re-running a query for a history entry navigated back to.
    async fn run_search(&self, query: String, seq: u64, update_history: bool) {
        let model = self.model.lock().await;
        let Some(client) = model.client.clone() else {
            return;
        };
        if model.search_superseded(seq) {
            return;
        }
        model.set_content_loading(true).await;
        drop(model);

        tracing::debug!(query = %query, seq, "Performing search");
        let result = client.search(&query).await;

        let model = self.model.lock().await;
        match result {
            Ok(results) => {
                if !model.apply_search_results(seq, results).await {
                    tracing::debug!(query = %query, seq, "Dropping superseded search result");
                    return;
                }
                if update_history {
                    let entry = NavEntry::Search {
                        query: query.clone(),
                    };
                    let title = format!("Search: {query}");
                    let url = format!("/search?q={query}");
                    // Consecutive keystrokes refine the same history entry;
                    // only the first search after another view pushes.
                    if matches!(model.navigation.current_entry().await, NavEntry::Search { .. }) {
                        model.navigation.replace(entry, title, url).await;
                    } else {
                        model.navigation.push(entry, title, url).await;
                    }
                }
            }
            Err(e) => {
                if model.search_superseded(seq) {
                    tracing::debug!(query = %query, seq, error = %e, "Superseded search failed; ignoring");
                    return;
                }
                tracing::error!(query = %query, error = %e, "Search failed");
                // Keep whatever was rendered before; just surface the error.
                model.set_content_loading(false).await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn open_album(&self, id: &str) {
        self.load_album(id, true).await;
    }

    async fn load_album(&self, id: &str, push_history: bool) {
        let model = self.model.lock().await;
        let Some(client) = model.client.clone() else {
            return;
        };
        model.set_content_loading(true).await;
        drop(model);

        tracing::debug!(album_id = id, "Opening album");
        let result = client.album(id).await;

        let model = self.model.lock().await;
        match result {
            Ok(detail) => {
                let title = detail.title.clone();
                model.set_album_detail(detail).await;
                if push_history {
                    model
                        .navigation
                        .push(
                            NavEntry::Album { id: id.to_string() },
                            title,
                            format!("/album/{id}"),
                        )
                        .await;
                }
                model.set_active_section(ActiveSection::MainContent).await;
            }
            Err(e) => {
                tracing::error!(album_id = id, error = %e, "Failed to open album");
                model.set_content_loading(false).await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn handle_selected_item(&self, item: SelectedItem) {
        match item {
            SelectedItem::Album { id } => self.open_album(&id).await,
            // A track opens its album; an artist opens its first album.
            SelectedItem::Track { album_id } => self.open_album(&album_id).await,
            SelectedItem::Artist { albums } => {
                if let Some(id) = albums.first() {
                    let id = id.clone();
                    self.open_album(&id).await;
                }
            }
        }
    }

    pub async fn navigate_back(&self) {
        let navigation = self.model.lock().await.navigation.clone();
        if navigation.back().await.is_none() {
            tracing::debug!("Already at the oldest history entry");
        }
    }

    pub async fn navigate_forward(&self) {
        let navigation = self.model.lock().await.navigation.clone();
        if navigation.forward().await.is_none() {
            tracing::debug!("Already at the newest history entry");
        }
    }

    /// Reconstruct the view for an entry delivered by a pop event.
    ///
    /// Search results are ephemeral, so a popped search entry re-issues its
    /// query instead of restoring a snapshot.
    pub async fn restore_entry(&self, entry: NavEntry) {
        tracing::debug!(?entry, "Restoring history entry");
        match entry {
            NavEntry::Home => {
                let model = self.model.lock().await;
                model.set_search_query(String::new()).await;
                model.begin_search();
                model.clear_content().await;
            }
            NavEntry::Search { query } => {
                let seq = {
                    let model = self.model.lock().await;
                    model.set_search_query(query.clone()).await;
                    model.begin_search()
                };
                self.run_search(query, seq, false).await;
            }
            NavEntry::Album { id } => self.load_album(&id, false).await,
        }
    }
}
