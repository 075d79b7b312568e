//! Scripted transport for unit tests.

use async_trait::async_trait;
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

use crate::FetchError;
use crate::transport::{RawResponse, Transport};

/// Replays a fixed sequence of outcomes and records each request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, FetchError>>>,
    log: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Result<RawResponse, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Replays `bodies` as successive 200 responses.
    pub(crate) fn ok_bodies(bodies: &[&str]) -> Self {
        Self::new(
            bodies
                .iter()
                .map(|b| Ok(RawResponse::new(200, b.to_string())))
                .collect(),
        )
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    pub(crate) fn sent_at(&self) -> Vec<Instant> {
        self.log.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _method: Method, url: &str) -> Result<RawResponse, FetchError> {
        self.log
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Http("script exhausted".to_string())))
    }
}
