use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue, Method, StatusCode,
    },
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::{error, info};
use url::Url;

mod config;
mod error;

use config::load_settings;
use error::RelayError;

const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type, \
x-supabase-client-platform, x-supabase-client-platform-version, \
x-supabase-client-runtime, x-supabase-client-runtime-version";
const MAX_REQUEST_BYTES: usize = 64 * 1024;

struct AppState {
    http: reqwest::Client,
    upstream: Url,
    upstream_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let upstream = settings.upstream_endpoint()?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.upstream_timeout_seconds))
        .build()?;

    let state = AppState {
        http,
        upstream,
        upstream_token: settings.upstream_token,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.relay_bind.parse()?;
    info!(%addr, "relay listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/event-query", post(event_query).options(preflight))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn event_query(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), RelayError> {
    let result = match body {
        Ok(body) => forward(&state, &body).await,
        Err(rejection) => Err(RelayError::from(rejection)),
    };
    if let Err(error) = &result {
        if !matches!(error, RelayError::Upstream(_)) {
            error!(%error, "event-query error");
        }
    }
    result
}

async fn forward(
    state: &AppState,
    body: &[u8],
) -> Result<(StatusCode, Json<serde_json::Value>), RelayError> {
    let payload: serde_json::Value = serde_json::from_slice(body)?;

    let mut request = state.http.post(state.upstream.clone()).json(&payload);
    if let Some(token) = &state.upstream_token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await.map_err(RelayError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %detail, "upstream error");
        return Err(RelayError::Upstream(status));
    }

    let data = response
        .json::<serde_json::Value>()
        .await
        .map_err(RelayError::MalformedUpstream)?;
    Ok((status, Json(data)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
