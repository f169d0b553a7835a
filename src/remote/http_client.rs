use serde::de::DeserializeOwned;

use super::*;

/// Transport-level failure of a single round trip.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{label}: HTTP {status}")]
    Status {
        label: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{label}: {source}")]
    Transport {
        label: &'static str,
        source: reqwest::Error,
    },

    #[error("{label}: invalid response body: {source}")]
    Decode {
        label: &'static str,
        source: reqwest::Error,
    },
}

impl RequestError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport { .. } | RequestError::Decode { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            RequestError::Transport { source, .. } | RequestError::Decode { source, .. } => {
                source.is_timeout()
            }
            RequestError::Status { .. } => false,
        }
    }
}

impl SimulatorClient {
    pub(super) async fn send(
        &self,
        req: reqwest::RequestBuilder,
        label: &'static str,
    ) -> Result<reqwest::Response, RequestError> {
        let resp = req
            .send()
            .await
            .map_err(|source| RequestError::Transport { label, source })?;
        Self::ensure_ok(resp, label)
    }

    pub(super) fn ensure_ok(
        resp: reqwest::Response,
        label: &'static str,
    ) -> Result<reqwest::Response, RequestError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status { label, status });
        }
        Ok(resp)
    }

    pub(super) async fn read_json<T: DeserializeOwned>(
        resp: reqwest::Response,
        label: &'static str,
    ) -> Result<T, RequestError> {
        resp.json::<T>()
            .await
            .map_err(|source| RequestError::Decode { label, source })
    }

    pub(super) async fn read_text(
        resp: reqwest::Response,
        label: &'static str,
    ) -> Result<String, RequestError> {
        resp.text()
            .await
            .map_err(|source| RequestError::Decode { label, source })
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
