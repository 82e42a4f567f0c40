//! Application navigation history.
//!
//! A back/current/forward stack over a closed set of entry kinds, owned by
//! the model. Moving through the stack delivers the entry navigated to as a
//! pop event to every live subscriber, so view reconstruction is decoupled
//! from whatever triggered the move.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// One position in the application's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEntry {
    Home,
    Search { query: String },
    Album { id: String },
}

/// An entry together with its display strings for the top bar.
#[derive(Clone, Debug)]
struct NavRecord {
    entry: NavEntry,
    title: String,
    url: String,
}

impl NavRecord {
    fn home() -> Self {
        Self {
            entry: NavEntry::Home,
            title: "Library".to_string(),
            url: "/".to_string(),
        }
    }
}

struct NavStack {
    back: Vec<NavRecord>,
    current: NavRecord,
    forward: Vec<NavRecord>,
}

type PopHandler = Box<dyn Fn(&NavEntry) + Send>;

/// Handle for one registered pop-event handler.
///
/// Pass it back to [`NavigationBridge::unsubscribe`] to deregister.
#[must_use]
pub struct NavSubscription {
    id: u64,
}

#[derive(Clone)]
pub struct NavigationBridge {
    stack: Arc<Mutex<NavStack>>,
    handlers: Arc<Mutex<Vec<(u64, PopHandler)>>>,
    next_subscription: Arc<AtomicU64>,
}

impl NavigationBridge {
    pub fn new() -> Self {
        Self {
            stack: Arc::new(Mutex::new(NavStack {
                back: Vec::new(),
                current: NavRecord::home(),
                forward: Vec::new(),
            })),
            handlers: Arc::new(Mutex::new(Vec::new())),
            next_subscription: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record `entry` as the new current position. The previous position
    /// moves onto the back stack and the forward stack is discarded.
    pub async fn push(&self, entry: NavEntry, title: impl Into<String>, url: impl Into<String>) {
        let mut stack = self.stack.lock().await;
        let record = NavRecord {
            entry,
            title: title.into(),
            url: url.into(),
        };
        let previous = std::mem::replace(&mut stack.current, record);
        stack.back.push(previous);
        stack.forward.clear();
    }

    /// Swap the current position in place, leaving both stacks untouched.
    pub async fn replace(&self, entry: NavEntry, title: impl Into<String>, url: impl Into<String>) {
        let mut stack = self.stack.lock().await;
        stack.current = NavRecord {
            entry,
            title: title.into(),
            url: url.into(),
        };
    }

    /// Move one position back. Returns the entry navigated to and delivers
    /// it to all subscribers; `None` when already at the oldest entry.
    pub async fn back(&self) -> Option<NavEntry> {
        let entry = {
            let mut stack = self.stack.lock().await;
            let target = stack.back.pop()?;
            let previous = std::mem::replace(&mut stack.current, target);
            stack.forward.push(previous);
            stack.current.entry.clone()
        };
        self.notify(&entry).await;
        Some(entry)
    }

    /// Move one position forward, the mirror image of [`Self::back`].
    pub async fn forward(&self) -> Option<NavEntry> {
        let entry = {
            let mut stack = self.stack.lock().await;
            let target = stack.forward.pop()?;
            let previous = std::mem::replace(&mut stack.current, target);
            stack.back.push(previous);
            stack.current.entry.clone()
        };
        self.notify(&entry).await;
        Some(entry)
    }

    pub async fn current_entry(&self) -> NavEntry {
        self.stack.lock().await.current.entry.clone()
    }

    /// Display strings (title, url) of the current position.
    pub async fn location(&self) -> (String, String) {
        let stack = self.stack.lock().await;
        (stack.current.title.clone(), stack.current.url.clone())
    }

    /// Register a pop-event handler. Handlers accumulate; each registration
    /// gets its own handle.
    pub async fn subscribe(&self, handler: impl Fn(&NavEntry) + Send + 'static) -> NavSubscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.handlers.lock().await.push((id, Box::new(handler)));
        NavSubscription { id }
    }

    /// Remove exactly the handler registered for `subscription`.
    pub async fn unsubscribe(&self, subscription: NavSubscription) {
        let mut handlers = self.handlers.lock().await;
        handlers.retain(|(id, _)| *id != subscription.id);
    }

    async fn notify(&self, entry: &NavEntry) {
        let handlers = self.handlers.lock().await;
        for (_, handler) in handlers.iter() {
            handler(entry);
        }
    }
}

impl Default for NavigationBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn search(query: &str) -> NavEntry {
        NavEntry::Search {
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn push_then_back_delivers_the_pushed_entry() {
        let bridge = NavigationBridge::new();
        bridge.push(search("miles"), "Search", "/search?q=miles").await;
        bridge.push(NavEntry::Album { id: "a1".into() }, "Kind of Blue", "/album/a1").await;

        assert_eq!(bridge.back().await, Some(search("miles")));
        assert_eq!(bridge.current_entry().await, search("miles"));
        assert_eq!(bridge.back().await, Some(NavEntry::Home));
        assert_eq!(bridge.back().await, None);
    }

    #[tokio::test]
    async fn forward_retraces_after_back() {
        let bridge = NavigationBridge::new();
        bridge.push(search("miles"), "Search", "/search?q=miles").await;
        bridge.back().await;

        assert_eq!(bridge.forward().await, Some(search("miles")));
        assert_eq!(bridge.forward().await, None);
    }

    #[tokio::test]
    async fn push_discards_the_forward_stack() {
        let bridge = NavigationBridge::new();
        bridge.push(search("a"), "Search", "/search?q=a").await;
        bridge.back().await;
        bridge.push(search("b"), "Search", "/search?q=b").await;

        assert_eq!(bridge.forward().await, None);
        assert_eq!(bridge.back().await, Some(NavEntry::Home));
    }

    #[tokio::test]
    async fn replace_swaps_current_without_growing_history() {
        let bridge = NavigationBridge::new();
        bridge.push(search("m"), "Search", "/search?q=m").await;
        bridge.replace(search("mi"), "Search", "/search?q=mi").await;
        bridge.replace(search("mil"), "Search", "/search?q=mil").await;

        assert_eq!(bridge.current_entry().await, search("mil"));
        assert_eq!(bridge.back().await, Some(NavEntry::Home));
        assert_eq!(bridge.back().await, None);
    }

    #[tokio::test]
    async fn subscribers_receive_pop_events_until_unsubscribed() {
        let bridge = NavigationBridge::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let seen_by_handler = seen.clone();
        let subscription = bridge
            .subscribe(move |entry: &NavEntry| {
                seen_by_handler.lock().unwrap().push(entry.clone());
            })
            .await;

        bridge.push(search("miles"), "Search", "/search?q=miles").await;
        bridge.back().await;
        assert_eq!(seen.lock().unwrap().as_slice(), &[NavEntry::Home]);

        bridge.forward().await;
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[NavEntry::Home, search("miles")]
        );

        bridge.unsubscribe(subscription).await;
        bridge.back().await;
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn location_reflects_the_current_record() {
        let bridge = NavigationBridge::new();
        assert_eq!(bridge.location().await.1, "/");

        bridge.push(NavEntry::Album { id: "a1".into() }, "Kind of Blue", "/album/a1").await;
        let (title, url) = bridge.location().await;
        assert_eq!(title, "Kind of Blue");
        assert_eq!(url, "/album/a1");
    }
}
