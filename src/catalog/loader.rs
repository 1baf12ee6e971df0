use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
};

use futures::future::join_all;
use tracing::{
    info,
    warn,
};

use super::{
    models::SummaryItem,
    source::CatalogSource,
};
use crate::core::DexError;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Default)]
struct LoaderState {
    items: Vec<SummaryItem>,
    cursor: usize,
    exhausted: bool,
    pending: bool,
    error: Option<String>,
}

/// Clears `pending` however `load_next` exits, including when its future
/// is dropped mid-flight.
struct PendingGuard<'a>(&'a Mutex<LoaderState>);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).pending = false;
    }
}

/// A page that was appended to the list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCommit {
    /// Index of the first appended item.
    pub start: usize,
    pub items: Vec<SummaryItem>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Another load was in flight or the listing is exhausted.
    Skipped,
    Committed(PageCommit),
}

/// Append-only, incrementally loaded list of summary items.
///
/// The list only ever grows. A failed page leaves items and cursor
/// untouched so the same page can be requested again.
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    page_size: usize,
    state: Mutex<LoaderState>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, page_size: usize) -> Self {
        Self { source, page_size: page_size.max(1), state: Mutex::new(LoaderState::default()) }
    }

    fn state(&self) -> MutexGuard<'_, LoaderState> {
        // Never held across an await.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn items(&self) -> Vec<SummaryItem> {
        self.state().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.state().pending
    }

    pub fn has_more(&self) -> bool {
        !self.state().exhausted
    }

    pub fn cursor(&self) -> usize {
        self.state().cursor
    }

    /// Message of the last failed page, cleared once a page commits.
    pub fn last_error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Fetches the next page and appends it.
    ///
    /// Returns [`LoadOutcome::Skipped`] without touching anything when a
    /// load is already pending or the source has no further page.
    pub async fn load_next(&self) -> Result<LoadOutcome, DexError> {
        let offset = {
            let mut state = self.state();
            if state.pending || state.exhausted {
                return Ok(LoadOutcome::Skipped);
            }
            state.pending = true;
            state.cursor
        };
        let _pending = PendingGuard(&self.state);

        let listing = match self.source.list_summaries(offset, self.page_size).await {
            Ok(listing) => listing,
            Err(e) => {
                let err = DexError::PageLoad { offset, reason: e.to_string() };
                warn!(offset, "{err}");
                self.state().error = Some(err.to_string());
                return Err(err);
            }
        };

        let resolved =
            join_all(listing.names.into_iter().map(|name| self.resolve_item(name))).await;

        let mut state = self.state();
        let start = state.items.len();
        state.items.extend(resolved.iter().cloned());
        state.cursor += self.page_size;
        state.exhausted = !listing.has_next;
        state.error = None;

        info!(offset, count = resolved.len(), has_more = listing.has_next, "page committed");

        Ok(LoadOutcome::Committed(PageCommit {
            start,
            items: resolved,
            has_more: listing.has_next,
        }))
    }

    async fn resolve_item(&self, name: String) -> SummaryItem {
        match self.source.get_record(&name).await {
            Ok(record) => SummaryItem {
                id: record.id,
                category: record.categories.primary().to_string(),
                name,
            },
            Err(e) => {
                let err = DexError::ItemResolution { name: name.clone(), reason: e.to_string() };
                warn!("{err}, using placeholder");
                SummaryItem::placeholder(name)
            }
        }
    }
}
