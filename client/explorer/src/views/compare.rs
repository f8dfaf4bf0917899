use std::{fmt::Write, sync::Arc};

use api::{Character, Collection};
use query::DrainReport;

use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Two characters picked from the full catalogue, shown side by side.
pub struct Comparison {
    state: Arc<State>,
    characters: Vec<Character>,
    first: Option<usize>,
    second: Option<usize>,
}

impl Comparison {
    pub fn new(state: Arc<State>) -> Self {
        Self {
            state,
            characters: Vec::new(),
            first: None,
            second: None,
        }
    }

    pub async fn load(&mut self) -> DrainReport {
        let url = self.state.endpoint.collection(Collection::Character);
        let drained = self.state.drain(Collection::Character).collect(&url).await;

        self.characters = drained.items;
        self.first = None;
        self.second = None;
        drained.report
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Put character `id` in `slot`. Returns false if it has not been loaded.
    pub fn select(&mut self, slot: Slot, id: u32) -> bool {
        let Some(position) = self.characters.iter().position(|c| c.id == id) else {
            return false;
        };

        match slot {
            Slot::First => self.first = Some(position),
            Slot::Second => self.second = Some(position),
        }
        true
    }

    pub fn selected(&self, slot: Slot) -> Option<&Character> {
        let position = match slot {
            Slot::First => self.first,
            Slot::Second => self.second,
        };

        position.and_then(|i| self.characters.get(i))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Compare Characters\n");

        let (Some(first), Some(second)) = (self.selected(Slot::First), self.selected(Slot::Second))
        else {
            let _ = writeln!(out, "Select two characters to compare");
            return out;
        };

        let rows = [
            ("Name", first.name.as_str(), second.name.as_str()),
            ("Status", first.status.as_str(), second.status.as_str()),
            ("Species", first.species.as_str(), second.species.as_str()),
            ("Gender", first.gender.as_str(), second.gender.as_str()),
            ("Origin", first.origin.name.as_str(), second.origin.name.as_str()),
            ("Location", first.location.name.as_str(), second.location.name.as_str()),
        ];

        let width = rows
            .iter()
            .map(|(_, left, _)| left.chars().count())
            .max()
            .unwrap_or(0);

        for (label, left, right) in rows {
            let _ = writeln!(out, "{label:<9}{left:<width$}  |  {right}");
        }

        out
    }
}
