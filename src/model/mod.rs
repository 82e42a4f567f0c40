//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state, etc.)
//! - `content`: Content view data (search results, album details)
//! - `navigation`: Back/forward history with pop-event subscriptions
//! - `library_client`: HTTP client for the library server
//! - `app_model`: Main application model with state management methods

mod app_model;
mod content;
mod library_client;
mod navigation;
mod types;

// Re-export all public types for convenient access
pub use types::{ActiveSection, SelectedItem, UiState};

pub use content::{
    AlbumDetail, AlbumTrack, ContentState, ContentView, SearchAlbum, SearchArtist, SearchResults,
    SearchTrack,
};

pub use navigation::{NavEntry, NavSubscription, NavigationBridge};

pub use library_client::LibraryClient;

pub use app_model::AppModel;
