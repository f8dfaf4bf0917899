use std::collections::HashSet;

use api::{ApiError, Page, Source, fetch};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::collection::Shared;

/// Outcome of following a collection to its last page.
#[derive(Debug, Default)]
pub struct DrainReport {
    pub pages: usize,
    pub records: usize,
    /// Set when a page request failed and the drain stopped early.
    pub failure: Option<ApiError>,
}

impl DrainReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug)]
pub struct Drained<T> {
    pub items: Vec<T>,
    pub report: DrainReport,
}

/// Sequential pagination drain shared by every view.
pub struct Drain<'a> {
    source: &'a dyn Source,
    progress: Option<ProgressBar>,
}

impl<'a> Drain<'a> {
    pub fn new(source: &'a dyn Source) -> Self {
        Self {
            source,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Every record reachable from `start`, in page order.
    ///
    /// A failed page ends the drain with the records accumulated before it.
    pub async fn collect<T>(&self, start: &str) -> Drained<T>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();
        let report = self.pages(start, |page| items.extend(page)).await;

        Drained { items, report }
    }

    /// Like [`Drain::collect`] but streams each page into `collection`, cleared first.
    pub async fn fill<T>(&self, start: &str, collection: &Shared<T>) -> DrainReport
    where
        T: DeserializeOwned + Send + Sync,
    {
        collection.clear();
        self.pages(start, |page| collection.extend(page)).await
    }

    async fn pages<T, F>(&self, start: &str, mut sink: F) -> DrainReport
    where
        T: DeserializeOwned + Send,
        F: FnMut(Vec<T>) + Send,
    {
        let mut report = DrainReport::default();
        let mut visited = HashSet::new();
        let mut next = Some(start.to_string());

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                warn!(%url, "Page already drained, stopping");
                break;
            }

            let page: Page<T> = match fetch(self.source, &url).await {
                Ok(page) => page,
                Err(e) => {
                    error!(%url, error = %e, "Error draining collection");
                    report.failure = Some(e);
                    break;
                }
            };

            if report.pages == 0 {
                if let Some(progress) = &self.progress {
                    progress.set_length(u64::from(page.info.pages.max(1)));
                }
            }

            next = page.info.next_page().map(str::to_string);
            report.pages += 1;
            report.records += page.results.len();

            debug!(%url, records = page.results.len(), "Drained page");
            sink(page.results);

            if let Some(progress) = &self.progress {
                progress.inc(1);
                progress.set_message(format!("{} records", report.records));
            }
        }

        if let Some(progress) = &self.progress {
            progress.finish_with_message(format!("{} records", report.records));
        }

        info!(
            %start,
            pages = report.pages,
            records = report.records,
            complete = report.is_complete(),
            "Drain finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use api::{
        Character, Collection, Location,
        mock::{self, MockSource},
    };

    use super::*;

    fn names(characters: &[Character]) -> Vec<&str> {
        characters.iter().map(|c| c.name.as_str()).collect()
    }

    /// `pages` pages of `per_page` characters, ids counting up from 1.
    fn paged_source(pages: u32, per_page: u32) -> MockSource {
        let mut source = MockSource::new();

        for page in 1..=pages {
            let url = if page == 1 {
                mock::collection_url(Collection::Character)
            } else {
                mock::page_url(Collection::Character, page)
            };
            let next = (page < pages).then(|| mock::page_url(Collection::Character, page + 1));
            let results = (1..=per_page)
                .map(|i| {
                    let id = (page - 1) * per_page + i;
                    mock::character(id, &format!("Character {id}"), "Alive", "Human")
                })
                .collect();

            source = source.with_json(&url, &mock::page(results, next.as_deref()));
        }

        source
    }

    #[tokio::test]
    async fn test_drain_completeness() {
        let source = paged_source(3, 4);

        let drained: Drained<Character> = Drain::new(&source)
            .collect(&mock::collection_url(Collection::Character))
            .await;

        assert_eq!(drained.items.len(), 12);
        assert_eq!(
            drained.items.iter().map(|c| c.id).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
        assert_eq!(drained.report.pages, 3);
        assert!(drained.report.is_complete());
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_drain_keeps_partial_result() {
        let source = paged_source(3, 2).with_status(&mock::page_url(Collection::Character, 2), 500);

        let drained: Drained<Character> = Drain::new(&source)
            .collect(&mock::collection_url(Collection::Character))
            .await;

        assert_eq!(names(&drained.items), vec!["Character 1", "Character 2"]);
        assert_eq!(drained.report.pages, 1);
        assert!(matches!(
            drained.report.failure,
            Some(ApiError::Status { status: 500, .. })
        ));
        // page 3 is never requested
        assert_eq!(source.hits(&mock::page_url(Collection::Character, 3)), 0);
    }

    #[tokio::test]
    async fn test_drain_first_page_failure_is_empty() {
        let source = MockSource::new();

        let drained: Drained<Character> = Drain::new(&source)
            .collect(&mock::collection_url(Collection::Character))
            .await;

        assert!(drained.items.is_empty());
        assert!(matches!(
            drained.report.failure,
            Some(ApiError::Unreachable { .. })
        ));
    }

    #[tokio::test]
    async fn test_drain_unreachable_next() {
        let start = mock::collection_url(Collection::Location);
        let source = MockSource::new().with_json(
            &start,
            &mock::page(
                vec![mock::location(1, "Earth (C-137)")],
                Some("https://nowhere.invalid/api/location?page=2"),
            ),
        );

        let drained: Drained<Location> = Drain::new(&source).collect(&start).await;

        assert_eq!(drained.items.len(), 1);
        assert!(!drained.report.is_complete());
    }

    #[tokio::test]
    async fn test_drain_stops_on_empty_or_missing_next() {
        let start = mock::collection_url(Collection::Location);
        let empty_next = MockSource::new().with_body(
            &start,
            r#"{"info": {"next": ""}, "results": [{"id": 1, "name": "Earth (C-137)"}]}"#,
        );
        let missing_info =
            MockSource::new().with_body(&start, r#"{"results": [{"id": 2, "name": "Abadango"}]}"#);

        let first: Drained<Location> = Drain::new(&empty_next).collect(&start).await;
        let second: Drained<Location> = Drain::new(&missing_info).collect(&start).await;

        assert_eq!(first.items.len(), 1);
        assert!(first.report.is_complete());
        assert_eq!(second.items[0].name, "Abadango");
        assert_eq!(missing_info.requests(), vec![start]);
    }

    #[tokio::test]
    async fn test_drain_stops_on_self_referencing_next() {
        let start = mock::collection_url(Collection::Location);
        let source = MockSource::new().with_json(
            &start,
            &mock::page(vec![mock::location(1, "Earth (C-137)")], Some(&start)),
        );

        let drained: Drained<Location> = Drain::new(&source).collect(&start).await;

        assert_eq!(drained.items.len(), 1);
        assert_eq!(source.hits(&start), 1);
    }

    #[tokio::test]
    async fn test_fill_replaces_collection() {
        let source = paged_source(2, 3);
        let collection = Shared::from_vec(vec![]);
        collection.extend(vec![
            serde_json::from_value::<Character>(mock::character(99, "Stale", "Dead", "Alien")).unwrap(),
        ]);

        let report = Drain::new(&source)
            .fill(&mock::collection_url(Collection::Character), &collection)
            .await;

        assert_eq!(report.records, 6);
        assert_eq!(collection.len(), 6);
        assert!(collection.with(|items| items.iter().all(|c| c.id != 99)));
    }

    #[tokio::test]
    async fn test_drain_with_progress() {
        let source = paged_source(2, 1);
        let progress = ProgressBar::hidden();

        let drained: Drained<Character> = Drain::new(&source)
            .with_progress(progress.clone())
            .collect(&mock::collection_url(Collection::Character))
            .await;

        assert_eq!(drained.items.len(), 2);
        assert_eq!(progress.position(), 2);
        assert!(progress.is_finished());
    }
}
