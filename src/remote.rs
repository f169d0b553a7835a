//! Async HTTP client for the memory-management simulator.

use std::time::Duration;

use anyhow::{Context, Result};

mod http_client;
pub use self::http_client::RequestError;

mod types;
pub use self::types::*;
mod operations;

/// Thin wrapper over a `reqwest::Client` bound to one simulator base URL.
///
/// Every method is a single round trip; nothing here touches mirrored state.
#[derive(Clone)]
pub struct SimulatorClient {
    base_url: String,
    client: reqwest::Client,
}

impl SimulatorClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("memsim");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
