use std::{future::pending, io::Write, sync::Arc};

use query::DrainReport;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    signal::ctrl_c,
    task::{JoinError, JoinHandle},
};
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    state::State,
    views::{Action, Catalogue, render_suggestions},
};

/// Catalogue session over `input` lines. Characters load in the background;
/// suggestions are written whenever the debounce fires.
pub async fn interactive<R, W>(state: Arc<State>, input: R, out: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut catalogue = Catalogue::new(state);
    let mut suggestions = catalogue.subscribe();
    let mut loading = Some(catalogue.spawn_load());
    let mut lines = input.lines();

    let shutdown = ctrl_c();
    tokio::pin!(shutdown);

    write!(out, "{}", catalogue.render())?;

    loop {
        tokio::select! {
            finished = loaded(&mut loading) => {
                loading = None;
                report(finished);
                catalogue.refresh();
                write!(out, "{}", catalogue.render())?;
            }
            changed = suggestions.changed() => {
                if changed.is_err() {
                    break;
                }

                let rendered = render_suggestions(&suggestions.borrow_and_update());
                write!(out, "{rendered}")?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                let line = line.trim_end();
                if line.trim().is_empty() {
                    continue;
                }

                if matches!(line.trim(), "quit" | "q") {
                    break;
                }

                match line.parse::<Action>() {
                    Ok(action) => {
                        if catalogue.apply(action) {
                            write!(out, "{}", catalogue.render())?;
                        }
                    }
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            Ok(()) = &mut shutdown => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }

        out.flush()?;
    }

    if let Some(handle) = loading {
        handle.abort();
    }

    Ok(())
}

async fn loaded(handle: &mut Option<JoinHandle<DrainReport>>) -> Result<DrainReport, JoinError> {
    match handle {
        Some(handle) => handle.await,
        None => pending().await,
    }
}

fn report(finished: Result<DrainReport, JoinError>) {
    match finished {
        Ok(DrainReport {
            failure: Some(e), ..
        }) => warn!(error = %e, "Character catalogue is incomplete"),
        Ok(report) => info!(records = report.records, "Character catalogue loaded"),
        Err(e) => error!(error = %e, "Character load task failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use api::{
        Collection,
        mock::{self, MockSource},
    };
    use tokio::{
        io::{AsyncWriteExt, BufReader, duplex},
        time::sleep,
    };

    use super::*;
    use crate::config::Config;

    fn state() -> Arc<State> {
        let characters = vec![
            mock::character(1, "Rick Sanchez", "Alive", "Human"),
            mock::character(2, "Morty Smith", "Alive", "Human"),
            mock::character(3, "Summer Smith", "Alive", "Human"),
            mock::character(4, "Birdperson", "Dead", "Bird-Person"),
        ];
        let source = MockSource::new().with_json(
            &mock::collection_url(Collection::Character),
            &mock::page(characters, None),
        );
        let config = Config {
            page_size: 2,
            debounce: Duration::from_millis(500),
            progress: false,
            ..Config::default()
        };

        State::with_source(config, Arc::new(source)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_then_pick() {
        let (reader, mut writer) = duplex(256);
        let mut out = Vec::new();

        let driver = async move {
            writer.write_all(b"type smith\n").await.unwrap();
            sleep(Duration::from_secs(1)).await;
            writer.write_all(b"pick 2\n").await.unwrap();
            sleep(Duration::from_millis(100)).await;
            writer.write_all(b"quit\n").await.unwrap();
            writer
        };

        let (result, _writer) = tokio::join!(
            interactive(state(), BufReader::new(reader), &mut out),
            driver
        );
        result.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Rick and Morty Explorer"));
        assert!(out.contains("Suggestions for \"smith\":\n  1. Morty Smith\n  2. Summer Smith"));
        assert!(out.contains("Search: Summer Smith"));
        assert!(out.contains("Page 1 of 1 (1 characters)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_command_and_eof() {
        let input: &[u8] = b"\n   \ndance\nstatus dead\n";
        let mut out = Vec::new();

        interactive(state(), input, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Unknown command: dance"));
        assert!(out.contains("Status: dead"));
    }
}
