//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and the library server. It is organized
//! into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `browse`: Search and album browsing, history restoration

mod browse;
mod input;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        if let Some(http_error) = error.root_cause().downcast_ref::<reqwest::Error>() {
            if http_error.is_connect() {
                return "Cannot reach the library server. Is it running?".to_string();
            }
            if http_error.is_timeout() {
                return "The library server did not respond in time.".to_string();
            }
            if let Some(status) = http_error.status() {
                return match status.as_u16() {
                    404 => "Not found on the library server.".to_string(),
                    500..=599 => format!("The library server failed ({status})."),
                    _ => format!("Library server error: {status}."),
                };
            }
        }
        format!("Error: {error}")
    }
}
