use std::fmt;

use url::Url;

use crate::error::ApiError;

pub const API_BASE: &str = "https://rickandmortyapi.com/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Character,
    Episode,
    Location,
}

impl Collection {
    pub const fn path(self) -> &'static str {
        match self {
            Collection::Character => "character",
            Collection::Episode => "episode",
            Collection::Location => "location",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Base url of the API, normalized so collection paths join beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base).map_err(|_| ApiError::InvalidUrl(base.to_string()))?;

        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    /// First page of a collection.
    pub fn collection(&self, collection: Collection) -> String {
        self.join(collection.path())
    }

    /// Single record of a collection.
    pub fn item(&self, collection: Collection, id: u32) -> String {
        self.join(&format!("{}/{id}", collection.path()))
    }

    fn join(&self, path: &str) -> String {
        // Paths are static segments plus a number, joining cannot fail.
        self.base
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{path}", self.base))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base: Url::parse(&format!("{API_BASE}/")).expect("default API base is valid"),
        }
    }
}
