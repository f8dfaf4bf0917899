use std::{fmt::Write, str::FromStr, sync::Arc};

use api::{Character, Collection};
use query::{CatalogueQuery, DrainReport, Shared, SuggestionMatcher, Suggestions};
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::state::State;

/// One user interaction with the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search box now reads this text.
    Type(String),
    /// Pick the n-th suggestion, counted from 1.
    Pick(usize),
    /// Search with the current text.
    Search,
    Status(String),
    Species(String),
    Next,
    Previous,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim_end_matches(['\r', '\n']);

        match command.trim_end() {
            "type" => Ok(Action::Type(rest.to_string())),
            "pick" => rest
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Action::Pick)
                .ok_or_else(|| format!("Not a suggestion number: {rest}")),
            "search" => Ok(Action::Search),
            "status" => Ok(Action::Status(rest.trim().to_string())),
            "species" => Ok(Action::Species(rest.trim().to_string())),
            "next" | "n" => Ok(Action::Next),
            "prev" | "p" => Ok(Action::Previous),
            other => Err(format!("Unknown command: {other}")),
        }
    }
}

/// Character grid with search, status/species filters and pages.
pub struct Catalogue {
    state: Arc<State>,
    characters: Shared<Character>,
    query: CatalogueQuery,
    search: SuggestionMatcher,
    loaded: bool,
}

impl Catalogue {
    pub fn new(state: Arc<State>) -> Self {
        let characters = Shared::new();

        Self {
            query: CatalogueQuery::new(state.config.page_size),
            search: SuggestionMatcher::new(characters.clone(), state.config.debounce),
            characters,
            state,
            loaded: false,
        }
    }

    pub async fn load(&mut self) -> DrainReport {
        let url = self.state.endpoint.collection(Collection::Character);
        let report = self
            .state
            .drain(Collection::Character)
            .fill(&url, &self.characters)
            .await;

        self.refresh();
        report
    }

    /// Drain in the background. Suggestions see characters as pages arrive; call
    /// [`Catalogue::refresh`] once the drain is done to rebuild the grid.
    pub fn spawn_load(&self) -> JoinHandle<DrainReport> {
        let state = Arc::clone(&self.state);
        let characters = self.characters.clone();

        tokio::spawn(async move {
            let url = state.endpoint.collection(Collection::Character);
            state.drain(Collection::Character).fill(&url, &characters).await
        })
    }

    pub fn refresh(&mut self) {
        self.query.set_collection(self.characters.snapshot());
        self.loaded = true;
    }

    pub fn query(&self) -> &CatalogueQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut CatalogueQuery {
        &mut self.query
    }

    pub fn search(&self) -> &SuggestionMatcher {
        &self.search
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.search.subscribe()
    }

    /// Returns whether the grid changed.
    pub fn apply(&mut self, action: Action) -> bool {
        debug!(?action, "Catalogue action");

        match action {
            Action::Type(text) => {
                self.search.input(text);
                false
            }
            Action::Pick(n) => match n.checked_sub(1).and_then(|i| self.search.select_index(i)) {
                Some(name) => self.query.set_name(name),
                None => false,
            },
            Action::Search => {
                let name = self.search.submit();
                self.query.set_name(name)
            }
            Action::Status(status) => self.query.set_status(status),
            Action::Species(species) => self.query.set_species(species),
            Action::Next => self.query.next_page(),
            Action::Previous => self.query.previous_page(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Rick and Morty Explorer");
        let _ = writeln!(out, "Discover characters from the multiverse\n");

        let filters = self.query.filters();
        let _ = writeln!(
            out,
            "Search: {}  Status: {}  Species: {}\n",
            shown(&filters.name),
            shown(&filters.status),
            shown(&filters.species)
        );

        if !self.loaded {
            let _ = writeln!(out, "Loading...");
            return out;
        }

        let page = self.query.page_items();
        if page.is_empty() {
            let _ = writeln!(out, "No characters found");
        }

        for character in page {
            let mark = if character.is_alive() { '✓' } else { '✗' };
            let _ = writeln!(out, "[{}] {}", character.id, character.name);
            let _ = writeln!(out, "    {mark} {}  {}", character.status, character.species);
            let _ = writeln!(out, "    Last Known Location: {}", character.location.name);
            let _ = writeln!(out, "    First Seen In: {}", character.origin.name);
        }

        let _ = writeln!(
            out,
            "\nPage {} of {} ({} characters)  {}  {}",
            self.query.page() + 1,
            self.query.page_count().max(1),
            self.query.filtered_len(),
            if self.query.has_previous() { "[prev]" } else { " prev " },
            if self.query.has_next() { "[next]" } else { " next " },
        );

        out
    }
}

pub fn render_suggestions(suggestions: &Suggestions) -> String {
    let mut out = String::new();

    if suggestions.matches.is_empty() {
        if !suggestions.query.is_empty() {
            let _ = writeln!(out, "No suggestions for \"{}\"", suggestions.query);
        }
        return out;
    }

    let _ = writeln!(out, "Suggestions for \"{}\":", suggestions.query);
    for (n, suggestion) in suggestions.matches.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", n + 1, suggestion.name);
    }

    out
}

fn shown(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(value) if !value.is_empty() => value,
        _ => "any",
    }
}
