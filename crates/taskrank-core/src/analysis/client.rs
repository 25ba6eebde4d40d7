//! HTTP client for the remote scoring service.
//!
//! Two calls exist: `POST {base}/analyze/` and `GET {base}/suggest/`.
//! There is no timeout, retry or cancellation; a slow request simply
//! stays pending until it resolves.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::{AnalyzeRequest, AnalyzedTask, ErrorPayload, SuggestResponse};
use crate::error::{AnalysisError, CoreError, ValidationError};
use crate::strategy::Strategy;
use crate::task::Task;

/// Base address used when no configuration overrides it.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/tasks";

pub const DEFAULT_SUGGEST_LIMIT: u32 = 3;

/// Largest `limit` the suggest endpoint accepts.
pub const MAX_SUGGEST_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: Client,
    base: Url,
}

impl ScoringClient {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidBaseUrl`] if `base` is not a URL.
    pub fn new(base: &str) -> Result<Self, AnalysisError> {
        // Url::join drops the last path segment unless it ends in '/'.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|source| AnalysisError::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, AnalysisError> {
        self.base
            .join(path)
            .map_err(|source| AnalysisError::InvalidBaseUrl {
                url: self.base.to_string(),
                source,
            })
    }

    /// Score the full task list under `strategy`.
    ///
    /// Results come back in the service's order.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyInput`] without touching the network when `tasks`
    /// is empty; otherwise [`CoreError::Analysis`] for any transport,
    /// status or decoding failure.
    pub async fn analyze(
        &self,
        strategy: Strategy,
        tasks: &[Task],
    ) -> Result<Vec<AnalyzedTask>, CoreError> {
        if tasks.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let url = self.endpoint("analyze/")?;
        tracing::debug!(%url, %strategy, count = tasks.len(), "requesting analysis");

        let resp = self
            .http
            .post(url)
            .json(&AnalyzeRequest { strategy, tasks })
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        Ok(read_json(resp).await?)
    }

    /// Ask the service for its top `limit` tasks.
    ///
    /// The service ranks whatever it last analyzed; no local tasks are
    /// sent. An absent `tasks` key reads as an empty list.
    ///
    /// # Errors
    ///
    /// [`ValidationError::OutOfRange`] before any request when `limit` is
    /// outside `1..=50`; otherwise the same failures as [`Self::analyze`].
    pub async fn suggest(
        &self,
        strategy: Strategy,
        limit: u32,
    ) -> Result<Vec<AnalyzedTask>, CoreError> {
        validate_suggest_limit(limit)?;

        let url = self.endpoint("suggest/")?;
        tracing::debug!(%url, %strategy, limit, "requesting suggestions");

        let resp = self
            .http
            .get(url)
            .query(&[("strategy", strategy.key().to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        let body: SuggestResponse = read_json(resp).await?;
        Ok(body.tasks.unwrap_or_default())
    }
}

/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] unless `1 <= limit <= 50`.
pub fn validate_suggest_limit(limit: u32) -> Result<(), ValidationError> {
    if (1..=MAX_SUGGEST_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "limit",
            value: i64::from(limit),
            min: 1,
            max: i64::from(MAX_SUGGEST_LIMIT),
        })
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, AnalysisError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorPayload>(&body)
            .ok()
            .and_then(|payload| payload.detail);
        if detail.is_none() {
            tracing::warn!(status = status.as_u16(), "error response carried no detail");
        } else {
            tracing::warn!(status = status.as_u16(), ?detail, "scoring service rejected request");
        }
        return Err(AnalysisError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_slice(&body).map_err(AnalysisError::Decode)
}
