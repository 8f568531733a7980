use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::protocol::RelayErrorBody;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Upstream error: {}", .0.as_u16())]
    Upstream(StatusCode),

    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream(status) => *status,
            RelayError::Body(_)
            | RelayError::MalformedRequest(_)
            | RelayError::Transport(_)
            | RelayError::MalformedUpstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(RelayErrorBody::new(self.to_string()))).into_response()
    }
}
