use std::{env, fmt::Display, str::FromStr, time::Duration};

use api::API_BASE;
use tracing::{info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub page_size: usize,
    pub debounce: Duration,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            page_size: query::paginator::DEFAULT_PAGE_SIZE,
            debounce: query::suggest::DEFAULT_DEBOUNCE,
            progress: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let page_size: usize = try_load(&lookup, "EXPLORER_PAGE_SIZE", "6")?;
        if page_size == 0 {
            return Err(AppError::Config {
                key: "EXPLORER_PAGE_SIZE",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api_base: try_load(&lookup, "EXPLORER_API_BASE", API_BASE)?,
            page_size,
            debounce: Duration::from_millis(try_load(&lookup, "EXPLORER_DEBOUNCE_MS", "2000")?),
            progress: try_load(&lookup, "EXPLORER_PROGRESS", "true")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, AppError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse::<T>()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config {
                key,
                reason: e.to_string(),
            }
        })
}
