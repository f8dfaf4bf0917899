use chrono::NaiveDate;
use serde::Deserialize;

use crate::id_from_url;

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl Info {
    /// Next page url, `None` when absent, null or empty.
    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref().map(str::trim).filter(|next| !next.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Page<T> {
    #[serde(default)]
    pub info: Info,
    pub results: Vec<T>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedLink {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: NamedLink,
    #[serde(default)]
    pub location: NamedLink,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

impl Character {
    pub fn is_alive(&self) -> bool {
        self.status.eq_ignore_ascii_case("alive")
    }

    /// Ids of the episodes this character appears in, in reference order.
    pub fn episode_ids(&self) -> Vec<u32> {
        self.episode.iter().filter_map(|url| id_from_url(url)).collect()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub air_date: String,
    #[serde(default, rename = "episode")]
    pub code: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

impl Episode {
    /// Air date as published, e.g. `December 2, 2013`.
    pub fn aired(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.air_date.trim(), "%B %d, %Y").ok()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}
