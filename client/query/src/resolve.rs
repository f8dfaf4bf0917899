use api::{ApiError, Source, fetch};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::latest::{Latest, Ticket};

/// Fetch every reference url at once and return the records in url order.
///
/// All or nothing: the first failure fails the whole set.
pub async fn resolve<T: DeserializeOwned>(source: &dyn Source, urls: &[String]) -> Result<Vec<T>, ApiError> {
    let resolved = try_join_all(urls.iter().map(|url| fetch::<T>(source, url))).await;

    match &resolved {
        Ok(records) => debug!(references = records.len(), "Resolved references"),
        Err(e) => error!(error = %e, "Error resolving references"),
    }

    resolved
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
}

/// The related records shown for at most one source entity.
///
/// Asking again for the entity already shown collapses it instead of fetching.
#[derive(Debug)]
pub struct Expansion<T> {
    open: Option<u32>,
    resolved: Vec<T>,
    latest: Latest,
}

impl<T> Default for Expansion<T> {
    fn default() -> Self {
        Self {
            open: None,
            resolved: Vec::new(),
            latest: Latest::new(),
        }
    }
}

impl<T> Expansion<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> Option<u32> {
        self.open
    }

    pub fn is_open(&self, id: u32) -> bool {
        self.open == Some(id)
    }

    pub fn resolved(&self) -> &[T] {
        &self.resolved
    }

    /// Collapse if `id` is open, otherwise open it with an empty set and hand out the ticket
    /// its resolution must commit with.
    pub fn begin(&mut self, id: u32) -> Option<Ticket> {
        self.resolved.clear();

        if self.is_open(id) {
            self.open = None;
            self.latest.invalidate();
            return None;
        }

        self.open = Some(id);
        Some(self.latest.begin())
    }

    /// Publish a resolution. Failures and superseded tickets publish nothing.
    pub fn commit(&mut self, ticket: Ticket, resolved: Result<Vec<T>, ApiError>) -> bool {
        match resolved {
            Ok(records) => self.latest.commit(ticket, &mut self.resolved, records),
            Err(_) => false,
        }
    }
}

impl<T: DeserializeOwned> Expansion<T> {
    /// Toggle `id`, resolving `urls` when it opens.
    pub async fn toggle(&mut self, source: &dyn Source, id: u32, urls: &[String]) -> Toggle {
        let Some(ticket) = self.begin(id) else {
            return Toggle::Collapsed;
        };

        let resolved = resolve(source, urls).await;
        self.commit(ticket, resolved);

        Toggle::Expanded
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use api::{
        Character,
        mock::{self, MockSource},
    };
    use tokio::time::Instant;

    use super::*;

    fn source() -> MockSource {
        MockSource::new()
            .with_json(&mock::character_url(1), &mock::character(1, "Rick Sanchez", "Alive", "Human"))
            .with_json(&mock::character_url(2), &mock::character(2, "Morty Smith", "Alive", "Human"))
            .with_json(&mock::character_url(3), &mock::character(3, "Summer Smith", "Alive", "Human"))
    }

    fn urls(ids: &[u32]) -> Vec<String> {
        ids.iter().map(|id| mock::character_url(*id)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolution_keeps_reference_order() {
        let source = source()
            .with_delay(&mock::character_url(1), Duration::from_millis(300))
            .with_delay(&mock::character_url(2), Duration::from_millis(200))
            .with_delay(&mock::character_url(3), Duration::from_millis(100));
        let started = Instant::now();

        let resolved: Vec<Character> = resolve(&source, &urls(&[1, 2, 3])).await.unwrap();

        assert_eq!(resolved.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        // concurrent, so the slowest reference bounds the wait
        assert_eq!(started.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_resolution_is_all_or_nothing() {
        let source = source().with_status(&mock::character_url(2), 500);

        let resolved = resolve::<Character>(&source, &urls(&[1, 2, 3])).await;

        assert!(matches!(resolved, Err(ApiError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_empty_references() {
        let source = MockSource::new();

        let resolved: Vec<Character> = resolve(&source, &[]).await.unwrap();

        assert!(resolved.is_empty());
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_collapses_without_requests() {
        let source = source();
        let references = urls(&[1, 2]);
        let mut expansion = Expansion::<Character>::new();

        assert_eq!(expansion.toggle(&source, 7, &references).await, Toggle::Expanded);
        assert_eq!(expansion.resolved().len(), 2);
        assert_eq!(source.requests().len(), 2);

        assert_eq!(expansion.toggle(&source, 7, &references).await, Toggle::Collapsed);
        assert!(expansion.resolved().is_empty());
        assert_eq!(expansion.open(), None);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_switching_source_entity() {
        let source = source();
        let mut expansion = Expansion::<Character>::new();

        expansion.toggle(&source, 1, &urls(&[1])).await;
        expansion.toggle(&source, 2, &urls(&[2, 3])).await;

        assert!(expansion.is_open(2));
        assert_eq!(
            expansion.resolved().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[tokio::test]
    async fn test_failed_resolution_publishes_nothing() {
        let source = source();
        let mut expansion = Expansion::<Character>::new();

        let toggle = expansion.toggle(&source, 4, &urls(&[1, 9])).await;

        assert_eq!(toggle, Toggle::Expanded);
        assert!(expansion.is_open(4));
        assert!(expansion.resolved().is_empty());
    }

    #[test]
    fn test_superseded_commit_is_dropped() {
        let mut expansion = Expansion::<u32>::new();

        let first = expansion.begin(1).unwrap();
        let second = expansion.begin(2).unwrap();

        assert!(!expansion.commit(first, Ok(vec![10])));
        assert!(expansion.commit(second, Ok(vec![20])));
        assert_eq!(expansion.resolved(), &[20]);
    }
}
