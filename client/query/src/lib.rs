//! # Catalogue Query
//!
//! Client-side acquisition and querying of the remote collections.
//!
//! ## Overall Data Structures
//!
//! In-memory structures:
//! - Collections (**list** of records in arrival order): Built by a single [`drain::Drain`] per view. Append-only while the drain
//!   runs, replaced wholesale by the next drain. Shared through [`collection::Shared`] so readers see whatever has loaded so far.
//!
//! - Filter set (name **substring**, status **equality**, species **substring**): All case-insensitive, combined with AND.
//!   An absent or empty predicate matches everything.
//!
//! - Page index (**int**): Client-side pages of the filtered view, independent of the API's own pages. Reset to the first page
//!   whenever the filtered view is recomputed.
//!
//! - Suggestions (**list** of id + name): Published by the debounced matcher once input settles.
//!
//! ## Fetch Policies
//! - Drain: sequential, one request per page. A failed page stops the drain and keeps what was already accumulated.
//! - Cross references: every reference url requested at once, results kept in reference order. One failure fails the set.
//! - Refetching views tag each request with a [`latest::Ticket`] and only commit the latest one.
//!
//! ## Debounce
//! 1. Every keystroke replaces the query and restarts the matcher's own timer, aborting the pending one.
//!
//! 2. When the timer elapses, the latest query is matched against the loaded characters and published.
//!
//! 3. Empty input clears suggestions right away. Picking a suggestion or submitting bypasses the timer.
pub mod catalogue;
pub mod collection;
pub mod drain;
pub mod filter;
pub mod latest;
pub mod paginator;
pub mod resolve;
pub mod suggest;
pub mod utils;

pub use catalogue::CatalogueQuery;
pub use collection::Shared;
pub use drain::{Drain, DrainReport, Drained};
pub use filter::FilterSet;
pub use latest::{Latest, Ticket};
pub use paginator::Paginator;
pub use resolve::{Expansion, Toggle, resolve};
pub use suggest::{Suggestion, SuggestionMatcher, Suggestions};
