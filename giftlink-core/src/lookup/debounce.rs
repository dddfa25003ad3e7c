// File: giftlink-core/src/lookup/debounce.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use giftlink_common::error::Error;
use giftlink_common::models::address::AddressSuggestion;
use giftlink_common::traits::lookup_traits::AddressLookup;

/// Wraps an [`AddressLookup`] with a quiet window so rapid keystrokes fire
/// one request instead of one per character. Each call takes a fresh
/// generation number; a call that finds itself superseded returns
/// `Ok(None)` and its result is dropped on the floor. That drop is the
/// intended behavior, not a fault, so nothing is logged.
pub struct SearchDebouncer {
    inner: Arc<dyn AddressLookup>,
    window: Duration,
    generation: AtomicU64,
}

impl SearchDebouncer {
    pub fn new(inner: Arc<dyn AddressLookup>, window: Duration) -> Self {
        Self {
            inner,
            window,
            generation: AtomicU64::new(0),
        }
    }

    /// `Ok(Some(suggestions))` if this query survived the quiet window,
    /// `Ok(None)` if a newer query superseded it. Empty queries resolve
    /// immediately to an empty list and never reach the client, but still
    /// supersede anything in flight.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<AddressSuggestion>>, Error> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Some(Vec::new()));
        }

        sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return Ok(None);
        }

        let results = self.inner.search_addresses(trimmed).await?;

        // A newer keystroke may have arrived while the request was in
        // flight; its answer wins.
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return Ok(None);
        }

        Ok(Some(results))
    }
}
