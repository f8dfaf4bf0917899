use std::{fmt::Write, sync::Arc};

use api::{Collection, Location};
use query::DrainReport;

use crate::state::State;

pub struct LocationList {
    state: Arc<State>,
    locations: Vec<Location>,
}

impl LocationList {
    pub fn new(state: Arc<State>) -> Self {
        Self {
            state,
            locations: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> DrainReport {
        let url = self.state.endpoint.collection(Collection::Location);
        let drained = self.state.drain(Collection::Location).collect(&url).await;

        self.locations = drained.items;
        drained.report
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Locations\n");

        if self.locations.is_empty() {
            let _ = writeln!(out, "No locations found");
        }

        for location in &self.locations {
            let _ = writeln!(out, "[{}] {} ({})", location.id, location.name, location.kind);
            let _ = writeln!(
                out,
                "    {}  {} residents",
                location.dimension,
                location.residents.len()
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use api::mock::{self, MockSource};

    use super::*;
    use crate::config::Config;

    fn list(source: MockSource) -> LocationList {
        let config = Config {
            progress: false,
            ..Config::default()
        };

        LocationList::new(State::with_source(config, Arc::new(source)).unwrap())
    }

    #[tokio::test]
    async fn test_drains_every_page() {
        let next = mock::page_url(Collection::Location, 2);
        let source = MockSource::new()
            .with_json(
                &mock::collection_url(Collection::Location),
                &mock::page(vec![mock::location(1, "Earth (C-137)")], Some(&next)),
            )
            .with_json(&next, &mock::page(vec![mock::location(2, "Abadango")], None));
        let mut list = list(source);

        let report = list.load().await;

        assert!(report.is_complete());
        assert_eq!(report.pages, 2);
        let rendered = list.render();
        assert!(rendered.contains("[1] Earth (C-137) (Planet)"));
        assert!(rendered.contains("[2] Abadango (Planet)"));
        assert!(rendered.contains("Dimension C-137  0 residents"));
    }

    #[tokio::test]
    async fn test_failed_first_page() {
        let source =
            MockSource::new().with_status(&mock::collection_url(Collection::Location), 500);
        let mut list = list(source);

        let report = list.load().await;

        assert!(!report.is_complete());
        assert!(list.locations().is_empty());
        assert!(list.render().contains("No locations found"));
    }
}
