use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use api::Character;
use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::debug;

use crate::{
    collection::Shared,
    latest::{Latest, Ticket},
    utils::contains_folded,
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: u32,
    pub name: String,
}

/// What the matcher last published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    pub query: String,
    pub matches: Vec<Suggestion>,
}

/// Characters whose name contains `query`, ignoring case, in collection order.
pub fn matches(characters: &[Character], query: &str) -> Vec<Suggestion> {
    characters
        .iter()
        .filter(|character| contains_folded(&character.name, query))
        .map(|character| Suggestion {
            id: character.id,
            name: character.name.clone(),
        })
        .collect()
}

/// Debounced name matcher over a character collection that may still be loading.
///
/// Owns its timer. Each input aborts the pending one, so only the last input of a burst is matched.
/// Must be driven from inside a tokio runtime.
pub struct SuggestionMatcher {
    characters: Shared<Character>,
    delay: Duration,
    query: String,
    timer: Option<JoinHandle<()>>,
    latest: Latest,
    published: Arc<watch::Sender<Suggestions>>,
    computed: Arc<AtomicUsize>,
}

impl SuggestionMatcher {
    pub fn new(characters: Shared<Character>, delay: Duration) -> Self {
        let (published, _) = watch::channel(Suggestions::default());

        Self {
            characters,
            delay,
            query: String::new(),
            timer: None,
            latest: Latest::new(),
            published: Arc::new(published),
            computed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.published.subscribe()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.published.borrow().matches.clone()
    }

    /// How many times the timer fired and matched.
    pub fn computations(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }

    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// A keystroke: `text` is the whole input after it.
    pub fn input(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.cancel();
        debug!(query = %self.query, "User typed");

        if self.query.is_empty() {
            self.clear();
            return;
        }

        let ticket = self.latest.begin();
        let characters = self.characters.clone();
        let latest = self.latest.clone();
        let published = Arc::clone(&self.published);
        let computed = Arc::clone(&self.computed);
        let query = self.query.clone();
        let delay = self.delay;

        self.timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            fire(&characters, &latest, ticket, &published, &computed, query);
        }));
    }

    /// Pick a suggestion. Returns the text the search should apply right away.
    pub fn select(&mut self, suggestion: &Suggestion) -> String {
        debug!(name = %suggestion.name, "Suggestion picked");
        self.query = suggestion.name.clone();
        self.submit()
    }

    pub fn select_index(&mut self, index: usize) -> Option<String> {
        let suggestion = self.suggestions().get(index).cloned()?;
        Some(self.select(&suggestion))
    }

    /// Search with the current text now, skipping the timer.
    pub fn submit(&mut self) -> String {
        self.cancel();
        self.clear();
        debug!(query = %self.query, "Search triggered");
        self.query.clone()
    }

    fn cancel(&mut self) {
        self.latest.invalidate();

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn clear(&self) {
        self.published.send_if_modified(|current| {
            if current.matches.is_empty() && current.query.is_empty() {
                return false;
            }

            *current = Suggestions::default();
            true
        });
    }
}

impl Drop for SuggestionMatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn fire(
    characters: &Shared<Character>,
    latest: &Latest,
    ticket: Ticket,
    published: &watch::Sender<Suggestions>,
    computed: &AtomicUsize,
    query: String,
) {
    let matches = characters.with(|loaded| matches(loaded, &query));
    computed.fetch_add(1, Ordering::Relaxed);
    debug!(%query, matches = matches.len(), "Debounced query");

    published.send_if_modified(|current| {
        // a newer input or a pick may have landed while this one was matching
        if !latest.is_current(ticket) {
            return false;
        }

        *current = Suggestions { query, matches };
        true
    });
}
