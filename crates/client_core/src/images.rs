//! Row image resolution and per-slot load scheduling.

use std::{collections::HashMap, future::Future};

use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::join_base;

/// Absolute URL of a row image: the API base with `image_path` appended.
pub fn resolve_image_url(base: &Url, image_path: &str) -> Result<Url, url::ParseError> {
    join_base(base, image_path)
}

struct ScheduledLoad {
    url: Url,
    handle: JoinHandle<()>,
}

/// Tracks the in-flight image load of each visible row slot.
///
/// Binding a slot to a different URL aborts whatever that slot was loading
/// before the new load is spawned. Must be used from within a tokio runtime.
#[derive(Default)]
pub struct ImageScheduler {
    slots: HashMap<usize, ScheduledLoad>,
}

impl ImageScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `slot` is already loading `url` and nothing new was
    /// spawned.
    pub fn schedule<F>(&mut self, slot: usize, url: Url, load: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(current) = self.slots.get(&slot) {
            if current.url == url && !current.handle.is_finished() {
                return false;
            }
        }
        self.cancel(slot);
        let handle = tokio::spawn(load);
        self.slots.insert(slot, ScheduledLoad { url, handle });
        true
    }

    /// Aborts the load bound to `slot`. Returns whether one was still running.
    pub fn cancel(&mut self, slot: usize) -> bool {
        match self.slots.remove(&slot) {
            Some(previous) if !previous.handle.is_finished() => {
                debug!(slot, url = %previous.url, "cancelling image load for reused row");
                previous.handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, load) in self.slots.drain() {
            load.handle.abort();
        }
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.slots
            .values()
            .filter(|load| !load.handle.is_finished())
            .count()
    }
}

impl Drop for ImageScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
#[path = "tests/images_tests.rs"]
mod tests;
