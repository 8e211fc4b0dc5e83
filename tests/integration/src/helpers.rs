//! Test helpers for integration tests
//!
//! Provides utilities for spawning the fake reactions server, making raw
//! HTTP requests against it, and building widget configuration that points
//! at it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reactions_common::{BackoffMode, ReactionsConfig};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fake_server::{router, ServerState, SharedState};

/// Fake server instance that manages its lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a fake server with empty state on an ephemeral port
    pub async fn start() -> Result<Self> {
        Self::start_with_state(Arc::new(ServerState::default())).await
    }

    pub async fn start_with_state(state: SharedState) -> Result<Self> {
        let app = router(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Widget configuration pointing at this server, with no debounce and
    /// short retry delays
    pub fn config(&self) -> ReactionsConfig {
        let mut config = ReactionsConfig::default();
        config.server = self.base_url();
        config.performance.debounce_ms = 0;
        config.performance.retry_delay_ms = 10;
        config.performance.retry_backoff = BackoffMode::Linear;
        config
    }

    /// Make a GET request with query parameters
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).query(query).send().await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
