pub mod calendar;
pub mod events;
pub mod extract;

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use eventcal_core::EventcalError;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(events::router())
        .merge(calendar::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> &'static str {
    "OK"
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses, picking the status from the core error kind
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection.status();
        }
        if let Some(rejection) = self.0.downcast_ref::<PathRejection>() {
            return rejection.status();
        }
        if let Some(rejection) = self.0.downcast_ref::<QueryRejection>() {
            return rejection.status();
        }

        match self.0.downcast_ref::<EventcalError>() {
            Some(
                EventcalError::Validation(_)
                | EventcalError::InvalidMonth { .. }
                | EventcalError::InvalidDate(_)
                | EventcalError::InvalidTimestamp(_),
            ) => StatusCode::BAD_REQUEST,
            Some(EventcalError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(EventcalError::Conflict { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {:#}", self.0);
        } else {
            warn!(status = status.as_u16(), "request rejected: {}", self.0);
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Parse an `{id}` path segment
pub fn parse_id(raw: &str) -> Result<i64, EventcalError> {
    raw.trim()
        .parse()
        .map_err(|_| EventcalError::Validation("Invalid event ID".into()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use eventcal_core::EventStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::AppState;

    pub fn test_app() -> Router {
        super::app(AppState::new(EventStore::in_memory().unwrap()))
    }

    /// Send a request with an optional JSON body, returning status and parsed JSON
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }
}
