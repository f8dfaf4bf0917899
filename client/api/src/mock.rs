//! Canned [`Source`] for tests.
//!
//! Routes are exact urls. Unknown urls fail with [`ApiError::Unreachable`], which is also how an
//! unreachable `next` link shows up.
use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    endpoint::{API_BASE, Collection},
    error::ApiError,
    remote::Source,
};

#[derive(Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

#[derive(Default)]
pub struct MockSource {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                reply: Reply::Body(body.into()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_json(self, url: &str, value: &Value) -> Self {
        self.with_body(url, value.to_string())
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                reply: Reply::Status(status),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Delay the reply of an already registered route.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(url) {
            route.delay = delay;
        }
        self
    }

    /// Every requested url in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests().iter().filter(|request| *request == url).count()
    }
}

#[async_trait]
impl Source for MockSource {
    async fn get(&self, url: &str) -> Result<String, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let Some(route) = self.routes.get(url).cloned() else {
            return Err(ApiError::Unreachable {
                url: url.to_string(),
            });
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match route.reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(ApiError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }
}

pub fn collection_url(collection: Collection) -> String {
    format!("{API_BASE}/{}", collection.path())
}

pub fn page_url(collection: Collection, page: u32) -> String {
    format!("{}?page={page}", collection_url(collection))
}

pub fn character_url(id: u32) -> String {
    format!("{API_BASE}/character/{id}")
}

pub fn episode_url(id: u32) -> String {
    format!("{API_BASE}/episode/{id}")
}

pub fn character(id: u32, name: &str, status: &str, species: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "species": species,
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": format!("{API_BASE}/location/1") },
        "location": { "name": "Citadel of Ricks", "url": format!("{API_BASE}/location/3") },
        "image": format!("{API_BASE}/character/avatar/{id}.jpeg"),
        "episode": [],
        "url": character_url(id),
        "created": "2017-11-04T18:48:46.250Z",
    })
}

pub fn character_in(id: u32, name: &str, episodes: &[u32]) -> Value {
    let mut value = character(id, name, "Alive", "Human");
    value["episode"] = episodes.iter().map(|id| Value::from(episode_url(*id))).collect();
    value
}

pub fn episode(id: u32, name: &str, characters: &[u32]) -> Value {
    json!({
        "id": id,
        "name": name,
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": characters.iter().map(|id| character_url(*id)).collect::<Vec<_>>(),
        "url": episode_url(id),
        "created": "2017-11-10T12:56:33.798Z",
    })
}

pub fn location(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "Planet",
        "dimension": "Dimension C-137",
        "residents": [],
        "url": format!("{API_BASE}/location/{id}"),
        "created": "2017-11-10T12:42:04.162Z",
    })
}

pub fn page(results: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "info": { "count": results.len(), "pages": 1, "next": next, "prev": null },
        "results": results,
    })
}
