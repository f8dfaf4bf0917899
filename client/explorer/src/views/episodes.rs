use std::{fmt::Write, sync::Arc};

use api::{Character, Collection, Episode, fetch};
use query::{DrainReport, Expansion, Toggle, resolve};
use tracing::error;

use crate::state::State;

/// Every episode, with the character grid of at most one of them expanded.
pub struct EpisodeBrowser {
    state: Arc<State>,
    episodes: Vec<Episode>,
    expansion: Expansion<Character>,
}

impl EpisodeBrowser {
    pub fn new(state: Arc<State>) -> Self {
        Self {
            state,
            episodes: Vec::new(),
            expansion: Expansion::new(),
        }
    }

    pub async fn load(&mut self) -> DrainReport {
        let url = self.state.endpoint.collection(Collection::Episode);
        let drained = self.state.drain(Collection::Episode).collect(&url).await;

        self.episodes = drained.items;
        drained.report
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn expanded(&self) -> Option<u32> {
        self.expansion.open()
    }

    pub fn characters(&self) -> &[Character] {
        self.expansion.resolved()
    }

    /// Expand episode `id` with its characters, or collapse it if already expanded.
    pub async fn select(&mut self, id: u32) -> Toggle {
        let source = self.state.source.as_ref();

        if let Some(episode) = self.episodes.iter().find(|episode| episode.id == id) {
            return self.expansion.toggle(source, id, &episode.characters).await;
        }

        // not drained (yet), so the record itself has to be fetched first
        let Some(ticket) = self.expansion.begin(id) else {
            return Toggle::Collapsed;
        };

        let url = self.state.endpoint.item(Collection::Episode, id);

        let resolved = match fetch::<Episode>(source, &url).await {
            Ok(episode) => resolve(source, &episode.characters).await,
            Err(e) => {
                error!(id, error = %e, "Error fetching episode");
                Err(e)
            }
        };

        self.expansion.commit(ticket, resolved);
        Toggle::Expanded
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Explore Rick and Morty Episodes\n");

        for (index, episode) in self.episodes.iter().enumerate() {
            let marker = if self.expansion.is_open(episode.id) { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} Episode {}: {}", index + 1, episode.name);
            let _ = writeln!(out, "    Air Date: {}", aired(episode));
        }

        let Some(open) = self.expansion.open() else {
            return out;
        };

        if let Some(episode) = self.episodes.iter().find(|episode| episode.id == open) {
            let _ = writeln!(out, "\n{} ({})", episode.name, episode.code);
            let _ = writeln!(out, "Air Date: {}", aired(episode));
        } else {
            let _ = writeln!(out, "\nEpisode {open}");
        }

        let _ = writeln!(out, "Characters in this Episode:");
        for character in self.expansion.resolved() {
            let _ = writeln!(out, "  [{}] {}", character.id, character.name);
        }

        out
    }
}

fn aired(episode: &Episode) -> String {
    episode
        .aired()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| episode.air_date.clone())
}
