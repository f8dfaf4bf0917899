use std::sync::Arc;

use api::{Collection, Endpoint, HttpSource, Source};
use indicatif::{ProgressBar, ProgressStyle};
use query::Drain;

use super::{config::Config, error::AppError};

pub struct State {
    pub config: Config,
    pub endpoint: Endpoint,
    pub source: Arc<dyn Source>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        Self::with_source(config, Arc::new(HttpSource::new()))
    }

    pub fn with_source(config: Config, source: Arc<dyn Source>) -> Result<Arc<Self>, AppError> {
        let endpoint = Endpoint::new(&config.api_base)?;

        Ok(Arc::new(Self {
            config,
            endpoint,
            source,
        }))
    }

    /// Drain over this state's source, with a progress bar when enabled.
    pub fn drain(&self, collection: Collection) -> Drain<'_> {
        let drain = Drain::new(self.source.as_ref());

        if !self.config.progress {
            return drain;
        }

        drain.with_progress(progress_bar(collection))
    }
}

fn progress_bar(collection: Collection) -> ProgressBar {
    let pb = ProgressBar::new(1);

    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {prefix} {msg}",
    ) {
        pb.set_style(style.progress_chars("=> "));
    }

    pb.set_prefix(collection.to_string());
    pb
}
