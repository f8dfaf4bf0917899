//! Terminal explorer for the Rick and Morty catalogue API.
//!
//! Every collection is drained page by page from the public API, then browsed,
//! filtered and searched locally. Nothing is written back.
//!
//!
//!
//! # General Infrastructure
//! - `api` knows the wire format and how to fetch one URL
//! - `query` holds the reusable pieces: drain, filters, paginator, suggestions, resolver
//! - `explorer` wires them into views and renders those views as plain text
//! - Logs go to stderr, views go to stdout
//!
//!
//!
//! # Search Suggestions
//!
//! **Goal**: Avoid recomputing suggestions on every keystroke.
//!
//! - Every `type` command restarts a timer owned by the search box
//! - Only when the timer runs out are suggestions computed and printed
//! - Picking a suggestion or running `search` skips the timer entirely
//! - A timer that lost the race to a newer input never publishes
//!
//!
//!
//! # Notes
//!
//! ## Stale responses
//! Views that refetch on user input (character detail, episode expansion) hand out a generation
//! ticket per request. A response is only shown if its ticket is still the latest one, so a slow
//! earlier request can never overwrite a newer one.
//!
//! ## Partial results
//! A drain that fails halfway keeps every page it already received and reports the failure.
//! Resolving references is all or nothing: one failed reference shows none of them.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! `````
//!
//! Run with logs.
//! ```sh
//! RUST_LOG=info cargo run -- browse --status alive
//! ```
//!
//!
//!
//! # Configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `EXPLORER_API_BASE` | `https://rickandmortyapi.com/api` |
//! | `EXPLORER_PAGE_SIZE` | `6` |
//! | `EXPLORER_DEBOUNCE_MS` | `2000` |
//! | `EXPLORER_PROGRESS` | `true` |
use std::{io::Write, sync::Arc};

use api::{ApiError, Collection};
use query::{DrainReport, FilterSet};
use tokio::io::{BufReader, stdin};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod views;

use cli::{Args, Command};
use config::Config;
use error::AppError;
use state::State;
use views::{Catalogue, CharacterDetail, Comparison, EpisodeBrowser, LocationList, Slot};

pub async fn run(args: Args) -> Result<(), AppError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    let mut out = std::io::stdout().lock();
    execute(state, args.command, &mut out).await?;
    out.flush()?;

    Ok(())
}

pub async fn execute<W: Write>(state: Arc<State>, command: Command, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::Browse {
            name,
            status,
            species,
            page,
        } => {
            let mut catalogue = Catalogue::new(state);
            report(Collection::Character, catalogue.load().await);

            let query = catalogue.query_mut();
            query.set_filters(FilterSet {
                name,
                status,
                species,
            });

            let page = page.saturating_sub(1) as usize;
            if !query.go_to(page) {
                warn!(page = page + 1, pages = query.page_count(), "No such page");
            }

            write!(out, "{}", catalogue.render())?;
        }
        Command::Interactive => {
            session::interactive(state, BufReader::new(stdin()), out).await?;
        }
        Command::Character { id } => {
            let detail = CharacterDetail::new(state);

            match detail.show(id).await {
                Ok(_) => write!(out, "{}", detail.render())?,
                Err(ApiError::Status { status: 404, .. }) => {
                    return Err(AppError::NotFound {
                        collection: Collection::Character,
                        id,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Episodes { expand } => {
            let mut browser = EpisodeBrowser::new(state);
            report(Collection::Episode, browser.load().await);

            for id in expand {
                browser.select(id).await;
            }

            write!(out, "{}", browser.render())?;
        }
        Command::Compare { first, second } => {
            let mut comparison = Comparison::new(state);
            report(Collection::Character, comparison.load().await);

            for (slot, id) in [(Slot::First, first), (Slot::Second, second)] {
                if !comparison.select(slot, id) {
                    return Err(AppError::NotFound {
                        collection: Collection::Character,
                        id,
                    });
                }
            }

            write!(out, "{}", comparison.render())?;
        }
        Command::Locations => {
            let mut locations = LocationList::new(state);
            report(Collection::Location, locations.load().await);

            write!(out, "{}", locations.render())?;
        }
    }

    Ok(())
}

fn report(collection: Collection, report: DrainReport) {
    match report.failure {
        Some(e) => warn!(%collection, records = report.records, error = %e, "Showing partial results"),
        None => info!(%collection, records = report.records, pages = report.pages, "Loaded"),
    }
}
