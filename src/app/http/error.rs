//! Conversion of service errors into HTTP responses

use super::responses::ErrorBody;
use crate::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

impl Error {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Error::StoreUnavailable { .. }
            | Error::Schema { .. }
            | Error::Configuration { .. }
            | Error::Serialization { .. }
            | Error::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Render an error followed by each of its sources, `outer: inner: ...`
pub(crate) fn source_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        if self.is_client_error() {
            warn!("Rejected request: {}", self);
        } else {
            error!("Request failed: {}", source_chain(&self));
        }

        (status, Json(body)).into_response()
    }
}
