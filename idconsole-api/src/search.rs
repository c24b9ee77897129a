//! Debounced search for list screens.
//!
//! Keystrokes go into a [`SearchInput`]; the paired [`SearchDebouncer`]
//! yields a query only once no new term has arrived for the quiet period.

use crate::{Page, PageQuery, Resource, ResourceApi, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::trace;

/// Default quiet period before a search term is applied.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Sending half: submit search terms as the user types.
#[derive(Debug, Clone)]
pub struct SearchInput {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Submit a term. Returns `false` once the debouncer is gone.
    pub fn submit(&self, term: impl Into<String>) -> bool {
        self.tx.send(term.into()).is_ok()
    }
}

/// Receiving half: turns bursts of terms into page queries.
#[derive(Debug)]
pub struct SearchDebouncer {
    rx: mpsc::UnboundedReceiver<String>,
    quiet: Duration,
    query: PageQuery,
}

impl SearchDebouncer {
    /// Create a debouncer with the default quiet period.
    pub fn channel(base: PageQuery) -> (SearchInput, Self) {
        Self::with_quiet_period(base, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(base: PageQuery, quiet: Duration) -> (SearchInput, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            SearchInput { tx },
            Self {
                rx,
                quiet,
                query: base,
            },
        )
    }

    /// The query most recently yielded (or the base query).
    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    /// Wait for the next settled term.
    ///
    /// Returns the query for page 0 of that term, or `None` once every
    /// [`SearchInput`] is dropped and nothing is pending. A term still
    /// pending when the inputs close is flushed.
    pub async fn settled(&mut self) -> Option<PageQuery> {
        let mut term = self.rx.recv().await?;
        loop {
            match tokio::time::timeout(self.quiet, self.rx.recv()).await {
                Ok(Some(newer)) => {
                    trace!(superseded = %term, "Search term replaced");
                    term = newer;
                }
                Ok(None) | Err(_) => break,
            }
        }

        self.query = self.query.clone().search(term);
        Some(self.query.clone())
    }

    /// Wait for the next settled term and fetch its first page.
    pub async fn fetch_next<R: Resource>(
        &mut self,
        api: &ResourceApi<R>,
    ) -> Option<Result<Page<R>>> {
        let query = self.settled().await?;
        Some(api.list(&query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_term_in_burst_is_applied() {
        let (input, mut debouncer) = SearchDebouncer::channel(PageQuery::new().page(3));

        input.submit("a");
        input.submit("ad");
        input.submit("adm");

        let query = debouncer.settled().await.unwrap();
        assert_eq!(query.search.as_deref(), Some("adm"));
        assert_eq!(query.page, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_within_quiet_period_extends_wait() {
        let (input, mut debouncer) =
            SearchDebouncer::with_quiet_period(PageQuery::new(), Duration::from_millis(300));

        let typist = tokio::spawn(async move {
            input.submit("r");
            tokio::time::sleep(Duration::from_millis(200)).await;
            input.submit("ro");
            tokio::time::sleep(Duration::from_millis(200)).await;
            input.submit("rol");
            tokio::time::sleep(Duration::from_millis(1000)).await;
            input.submit("role");
        });

        let first = debouncer.settled().await.unwrap();
        assert_eq!(first.search.as_deref(), Some("rol"));

        let second = debouncer.settled().await.unwrap();
        assert_eq!(second.search.as_deref(), Some("role"));

        typist.await.unwrap();
        assert!(debouncer.settled().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_term_flushed_on_close() {
        let (input, mut debouncer) = SearchDebouncer::channel(PageQuery::new());
        input.submit("menu");
        drop(input);

        let query = debouncer.settled().await.unwrap();
        assert_eq!(query.search.as_deref(), Some("menu"));
        assert!(debouncer.settled().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_term_clears_search() {
        let (input, mut debouncer) =
            SearchDebouncer::channel(PageQuery::new().search("old").page(2));
        input.submit("   ");

        let query = debouncer.settled().await.unwrap();
        assert!(query.search.is_none());
        assert_eq!(query.page, 0);
        assert_eq!(debouncer.query(), &query);
    }
}
