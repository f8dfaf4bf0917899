use std::{
    fmt::Write,
    sync::{Arc, Mutex, PoisonError},
};

use api::{ApiError, Character, Collection, Episode, fetch};
use query::{Latest, resolve};
use tracing::{debug, error};

use crate::state::State;

#[derive(Debug, Clone)]
pub struct Detail {
    pub character: Character,
    /// Empty when the episode references could not all be resolved.
    pub episodes: Vec<Episode>,
}

/// Single character page. Only the most recently requested id is ever shown.
pub struct CharacterDetail {
    state: Arc<State>,
    latest: Latest,
    shown: Mutex<Option<Detail>>,
}

impl CharacterDetail {
    pub fn new(state: Arc<State>) -> Self {
        Self {
            state,
            latest: Latest::new(),
            shown: Mutex::new(None),
        }
    }

    /// Load `id`, superseding any earlier request still in flight.
    ///
    /// `Ok(false)` means a later request took over before this one finished.
    pub async fn show(&self, id: u32) -> Result<bool, ApiError> {
        let ticket = self.latest.begin();
        let source = self.state.source.as_ref();
        let url = self.state.endpoint.item(Collection::Character, id);

        let character: Character = fetch(source, &url).await.inspect_err(|e| {
            error!(id, error = %e, "Error fetching character");
        })?;

        if !self.latest.is_current(ticket) {
            debug!(id, "Dropping superseded character");
            return Ok(false);
        }

        let episodes = resolve::<Episode>(source, &character.episode)
            .await
            .unwrap_or_default();

        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        let committed = self
            .latest
            .commit(ticket, &mut *shown, Some(Detail { character, episodes }));

        if !committed {
            debug!(id, "Dropping superseded character");
        }

        Ok(committed)
    }

    pub fn shown(&self) -> Option<Detail> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn render(&self) -> String {
        let Some(Detail { character, episodes }) = self.shown() else {
            return "Loading...\n".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", character.name);
        let _ = writeln!(out, "{} - {}", character.status, character.species);
        let _ = writeln!(out, "Location: {}", character.location.name);
        let _ = writeln!(out, "Origin: {}", character.origin.name);
        let _ = writeln!(out, "Gender: {}", character.gender);

        let _ = writeln!(out, "\nAppeared in Episodes");

        if episodes.is_empty() {
            for id in character.episode_ids() {
                let _ = writeln!(out, "  Episode {id}");
            }
        }

        for episode in &episodes {
            let _ = writeln!(
                out,
                "  Episode {}: {} ({}, {})",
                episode.id, episode.name, episode.code, episode.air_date
            );
        }

        out
    }
}
