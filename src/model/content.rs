//! Content view state and data structures for search results and album details

use super::types::SelectedItem;

/// An artist from search results, with the ids of its albums
#[derive(Clone, Debug)]
pub struct SearchArtist {
    pub name: String,
    pub albums: Vec<String>,
}

/// An album from search results
#[derive(Clone, Debug)]
pub struct SearchAlbum {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Release date as sent by the server, `YYYY-MM-DD`.
    pub date: String,
}

impl SearchAlbum {
    /// The release year for display: the leading four characters of the date.
    ///
    /// Dates shorter than four bytes (or with a multi-byte character across
    /// the boundary) are shown as-is rather than panicking.
    pub fn release_year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }
}

/// A track from search results
#[derive(Clone, Debug)]
pub struct SearchTrack {
    pub title: String,
    pub artist: String,
    pub album_id: String,
    pub album: String,
}

/// Combined search results: three ordered groups, each possibly empty.
///
/// Produced fresh per query and never mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct SearchResults {
    pub artists: Vec<SearchArtist>,
    pub albums: Vec<SearchAlbum>,
    pub tracks: Vec<SearchTrack>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.tracks.is_empty()
    }

    /// Number of selectable rows in the grouped listing (headings excluded).
    pub fn selectable_len(&self) -> usize {
        self.artists.len() + self.albums.len() + self.tracks.len()
    }

    /// Map a flat cursor position onto an item: artists first, then albums,
    /// then tracks, matching the rendered group order.
    pub fn item_at(&self, index: usize) -> Option<SelectedItem> {
        if index < self.artists.len() {
            let artist = &self.artists[index];
            return Some(SelectedItem::Artist {
                albums: artist.albums.clone(),
            });
        }
        let index = index - self.artists.len();
        if index < self.albums.len() {
            return Some(SelectedItem::Album {
                id: self.albums[index].id.clone(),
            });
        }
        let index = index - self.albums.len();
        self.tracks.get(index).map(|t| SelectedItem::Track {
            album_id: t.album_id.clone(),
        })
    }
}

/// A track on an album detail page
#[derive(Clone, Debug)]
pub struct AlbumTrack {
    pub number: u32,
    pub title: String,
    pub artist: String,
    pub duration_seconds: u32,
}

/// Album detail view data
#[derive(Clone, Debug)]
pub struct AlbumDetail {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub date: String,
    pub tracks: Vec<AlbumTrack>,
}

impl AlbumDetail {
    pub fn release_year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    SearchResults {
        results: SearchResults,
        /// Flat cursor over the selectable rows of the grouped listing.
        selected: usize,
    },
    AlbumDetail {
        detail: AlbumDetail,
        selected: usize,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub is_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str, title: &str, date: &str) -> SearchAlbum {
        SearchAlbum {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Someone".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn release_year_takes_leading_four_characters() {
        assert_eq!(album("a", "A", "2020-05-17").release_year(), "2020");
        assert_eq!(album("a", "A", "1959-08-17").release_year(), "1959");
    }

    #[test]
    fn release_year_degrades_on_short_or_odd_dates() {
        assert_eq!(album("a", "A", "19").release_year(), "19");
        assert_eq!(album("a", "A", "").release_year(), "");
        // Multi-byte character straddling the 4-byte boundary must not panic.
        assert_eq!(album("a", "A", "20–05").release_year(), "20–05");
    }

    #[test]
    fn item_at_orders_artists_albums_tracks() {
        let results = SearchResults {
            artists: vec![SearchArtist {
                name: "Miles Davis".to_string(),
                albums: vec!["a1".to_string(), "a2".to_string()],
            }],
            albums: vec![album("a1", "Kind of Blue", "1959-08-17")],
            tracks: vec![SearchTrack {
                title: "So What".to_string(),
                artist: "Miles Davis".to_string(),
                album_id: "a1".to_string(),
                album: "Kind of Blue".to_string(),
            }],
        };

        assert_eq!(results.selectable_len(), 3);
        assert!(matches!(
            results.item_at(0),
            Some(SelectedItem::Artist { ref albums }) if albums.len() == 2
        ));
        assert!(matches!(
            results.item_at(1),
            Some(SelectedItem::Album { ref id }) if id == "a1"
        ));
        assert!(matches!(
            results.item_at(2),
            Some(SelectedItem::Track { ref album_id }) if album_id == "a1"
        ));
        assert!(results.item_at(3).is_none());
    }

    #[test]
    fn empty_results_have_no_selectable_rows() {
        let results = SearchResults::default();
        assert!(results.is_empty());
        assert_eq!(results.selectable_len(), 0);
        assert!(results.item_at(0).is_none());
    }
}
