//! In-memory transport fake (testing only)
//!
//! `ScriptedTransport` answers from a fixed route table keyed by URL path
//! and records every URL it was asked to fetch.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::transport::{FetchResult, ProbeBody, Transport};

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: u16,
    body: String,
}

/// Transport that replays scripted responses without touching the network.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, ScriptedResponse>,
    unreachable: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport for which every fetch fails with `description`.
    pub fn unreachable(description: &str) -> Self {
        Self {
            unreachable: Some(description.to_string()),
            ..Self::default()
        }
    }

    /// Answer requests whose URL path equals `path`.
    pub fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            ScriptedResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// URLs fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(description) = &self.unreachable {
            return FetchResult::Unreachable(description.clone());
        }

        let path = match reqwest::Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(e) => return FetchResult::Unreachable(format!("Request error: {}", e)),
        };

        match self.routes.get(&path) {
            Some(response) => FetchResult::Response {
                status: response.status,
                body: ProbeBody::classify(&response.body),
            },
            None => FetchResult::Response {
                status: 404,
                body: ProbeBody::classify("Not Found"),
            },
        }
    }
}
