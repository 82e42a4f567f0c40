//! HTTP client for the music library server

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use super::content::{AlbumDetail, AlbumTrack, SearchAlbum, SearchArtist, SearchResults, SearchTrack};

/// Client for the library server's JSON API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: Url,
    search_limit: usize,
}

impl LibraryClient {
    pub fn new(base_url: Url, timeout: Duration, search_limit: usize) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            search_limit,
        })
    }

    /// `GET /api/search?q=<query>`: the three result groups for a query.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let mut url = self
            .base_url
            .join("api/search")
            .context("Invalid server base URL")?;
        url.query_pairs_mut().append_pair("q", query);

        tracing::debug!(query, "API: search");
        let response = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()
            .context("Search request failed")?;
        let raw: RawSearchResponse = response
            .json()
            .await
            .context("Malformed search response")?;

        tracing::info!(
            query,
            artists = raw.artists.len(),
            albums = raw.albums.len(),
            tracks = raw.tracks.len(),
            "Search completed"
        );
        Ok(raw.into_results(self.search_limit))
    }

    /// `GET /api/album/<id>`: an album's header fields and track listing.
    pub async fn album(&self, id: &str) -> Result<AlbumDetail> {
        let url = self
            .base_url
            .join(&format!("api/album/{id}"))
            .context("Invalid server base URL")?;

        tracing::debug!(album_id = id, "API: album");
        let response = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()
            .context("Album request failed")?;
        let raw: RawAlbumDetail = response
            .json()
            .await
            .context("Malformed album response")?;
        Ok(raw.into_detail())
    }
}

// Wire shapes of the server's JSON, kept separate from the content model so
// the rest of the application never sees serde details.

#[derive(Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    artists: Vec<RawArtist>,
    #[serde(default)]
    albums: Vec<RawAlbum>,
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct RawArtist {
    name: String,
    #[serde(default)]
    albums: Vec<String>,
}

#[derive(Deserialize)]
struct RawAlbum {
    id: String,
    title: String,
    artist: String,
    #[serde(default)]
    date: String,
}

#[derive(Deserialize)]
struct RawTrack {
    title: String,
    artist: String,
    #[serde(rename = "albumId")]
    album_id: String,
    album: String,
}

#[derive(Deserialize)]
struct RawAlbumDetail {
    id: String,
    title: String,
    artist: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    tracks: Vec<RawAlbumTrack>,
}

#[derive(Deserialize)]
struct RawAlbumTrack {
    number: u32,
    title: String,
    artist: String,
    #[serde(rename = "durationSeconds")]
    duration_seconds: u32,
}

impl RawSearchResponse {
    fn into_results(self, limit: usize) -> SearchResults {
        SearchResults {
            artists: self
                .artists
                .into_iter()
                .take(limit)
                .map(|a| SearchArtist {
                    name: a.name,
                    albums: a.albums,
                })
                .collect(),
            albums: self
                .albums
                .into_iter()
                .take(limit)
                .map(|a| SearchAlbum {
                    id: a.id,
                    title: a.title,
                    artist: a.artist,
                    date: a.date,
                })
                .collect(),
            tracks: self
                .tracks
                .into_iter()
                .take(limit)
                .map(|t| SearchTrack {
                    title: t.title,
                    artist: t.artist,
                    album_id: t.album_id,
                    album: t.album,
                })
                .collect(),
        }
    }
}

impl RawAlbumDetail {
    fn into_detail(self) -> AlbumDetail {
        AlbumDetail {
            id: self.id,
            title: self.title,
            artist: self.artist,
            date: self.date,
            tracks: self
                .tracks
                .into_iter()
                .map(|t| AlbumTrack {
                    number: t.number,
                    title: t.title,
                    artist: t.artist,
                    duration_seconds: t.duration_seconds,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_response() {
        let body = r#"{
            "artists": [{"name": "Miles Davis", "albums": ["a1", "a2"]}],
            "albums": [{"id": "a1", "title": "Kind of Blue", "artist": "Miles Davis", "date": "1959-08-17"}],
            "tracks": [{"title": "So What", "artist": "Miles Davis", "albumId": "a1", "album": "Kind of Blue"}]
        }"#;

        let raw: RawSearchResponse = serde_json::from_str(body).unwrap();
        let results = raw.into_results(40);

        assert_eq!(results.artists.len(), 1);
        assert_eq!(results.artists[0].albums, vec!["a1", "a2"]);
        assert_eq!(results.albums[0].title, "Kind of Blue");
        assert_eq!(results.albums[0].release_year(), "1959");
        assert_eq!(results.tracks[0].album_id, "a1");
    }

    #[test]
    fn missing_groups_decode_as_empty() {
        let raw: RawSearchResponse = serde_json::from_str(r#"{"artists": []}"#).unwrap();
        let results = raw.into_results(40);
        assert!(results.is_empty());
    }

    #[test]
    fn search_limit_truncates_each_group() {
        let body = r#"{
            "tracks": [
                {"title": "One", "artist": "A", "albumId": "a1", "album": "X"},
                {"title": "Two", "artist": "A", "albumId": "a1", "album": "X"},
                {"title": "Three", "artist": "A", "albumId": "a1", "album": "X"}
            ]
        }"#;

        let raw: RawSearchResponse = serde_json::from_str(body).unwrap();
        let results = raw.into_results(2);
        assert_eq!(results.tracks.len(), 2);
    }

    #[test]
    fn decodes_album_detail() {
        let body = r#"{
            "id": "a1",
            "title": "Kind of Blue",
            "artist": "Miles Davis",
            "date": "1959-08-17",
            "tracks": [
                {"number": 1, "title": "So What", "artist": "Miles Davis", "durationSeconds": 562}
            ]
        }"#;

        let raw: RawAlbumDetail = serde_json::from_str(body).unwrap();
        let detail = raw.into_detail();
        assert_eq!(detail.release_year(), "1959");
        assert_eq!(detail.tracks[0].duration_seconds, 562);
    }
}
