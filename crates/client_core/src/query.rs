//! Client for the remote event query service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{QueryRequest, QueryResponse, QUERY_ROUTE};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_QUERY_BASE_URL: &str = "https://eventquery.km0lab.com";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid query endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to reach query service: {0}")]
    Transport(String),
    #[error("query service returned {0}")]
    Status(StatusCode),
    #[error("failed to decode query response: {0}")]
    Decode(String),
    #[error("query service is unavailable")]
    Unavailable,
}

#[async_trait]
pub trait EventQueryClient: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError>;
}

pub struct MissingEventQueryClient;

#[async_trait]
impl EventQueryClient for MissingEventQueryClient {
    async fn query(&self, _request: &QueryRequest) -> Result<QueryResponse, QueryError> {
        Err(QueryError::Unavailable)
    }
}

#[derive(Debug, Clone)]
pub struct HttpEventQueryClient {
    http: Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl HttpEventQueryClient {
    /// Targets `{base_url}/api/v1/query`; a path prefix on `base_url` is kept.
    pub fn for_service(base_url: &str) -> Result<Self, QueryError> {
        let mut base = parse_url(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(QUERY_ROUTE.trim_start_matches('/'))
            .map_err(|e| QueryError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::with_endpoint(endpoint))
    }

    /// Posts to `url` as given, e.g. a relay route.
    pub fn for_endpoint(url: &str) -> Result<Self, QueryError> {
        Ok(Self::with_endpoint(parse_url(url)?))
    }

    fn with_endpoint(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn parse_url(raw: &str) -> Result<Url, QueryError> {
    let url = Url::parse(raw.trim()).map_err(|e| QueryError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(QueryError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

#[async_trait]
impl EventQueryClient for HttpEventQueryClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
        let mut builder = self.http.post(self.endpoint.clone()).json(request);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint = %self.endpoint, "query service rejected request");
            return Err(QueryError::Status(status));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Decode(e.to_string()))?;
        debug!(events = body.events.len(), "query service answered");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
