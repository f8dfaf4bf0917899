//! # Remote Catalogue
//!
//! Wire model and transport for the Rick and Morty REST API.
//!
//! ## Collections
//! - `/character`, `/episode`, `/location`: page envelope of `info` (count, pages, next, prev) and `results`.
//! - `/character/{id}`, `/episode/{id}`: a single record.
//!
//! Records point at each other through **reference urls** ending in `/{id}`. A character lists the episodes
//! it appears in, an episode lists its characters, a location lists its residents.
//!
//! ## Notes
//! - `info.next` is `null` on the last page. A missing `info` block is treated the same way.
//! - Every request goes through [`Source`] so the query layer never touches `reqwest` directly.
use std::sync::LazyLock;

use regex::Regex;

pub mod endpoint;
pub mod error;
pub mod models;
pub mod remote;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use endpoint::{API_BASE, Collection, Endpoint};
pub use error::ApiError;
pub use models::{Character, Episode, Info, Location, NamedLink, Page};
pub use remote::{HttpSource, Source, fetch};

static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)/?$").expect("trailing id pattern is valid"));

/// Numeric id at the end of a reference url, e.g. `.../episode/28` -> `28`.
pub fn id_from_url(url: &str) -> Option<u32> {
    TRAILING_ID
        .captures(url.trim())
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::id_from_url;

    #[test]
    fn test_reference_ids() {
        assert_eq!(
            id_from_url("https://rickandmortyapi.com/api/episode/28"),
            Some(28)
        );
        assert_eq!(
            id_from_url("https://rickandmortyapi.com/api/character/1/"),
            Some(1)
        );
        assert_eq!(id_from_url(" https://x/api/location/3 "), Some(3));
    }

    #[test]
    fn test_reference_without_id() {
        assert_eq!(id_from_url("https://rickandmortyapi.com/api/episode"), None);
        assert_eq!(id_from_url(""), None);
        assert_eq!(id_from_url("https://x/api/character/abc"), None);
    }
}
