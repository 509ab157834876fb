//! Rain endpoint adapters.
//!
//! Translate HTTP requests into `RainService` calls and results back into
//! status codes, headers and JSON bodies. No validation rules live here
//! beyond decoding the wire format.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::owner_header;
use crate::http::response::{ApiError, Operation};
use crate::http::server::AppState;
use crate::rain::service::valid_owner;
use crate::rain::{RainResult, RainRecordInput};

/// Path of the rain collection; also the `Location` of created records.
pub const RAIN_PATH: &str = "/api/v1/rain";

pub const MALFORMED_BODY: &str = "Request body must be a JSON object with a boolean \"rain\" field";

/// `GET /api/v1/rain`
pub async fn list_rain(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let owner = owner_header(&headers).map(str::to_owned);
    let service = state.service.clone();

    let result = run_blocking(Operation::List, move || {
        service.list_observations(owner.as_deref())
    })
    .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `POST /api/v1/rain`
pub async fn record_rain(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let owner = owner_header(&headers).map(str::to_owned);

    let input = match decode_body(&body) {
        Ok(input) => input,
        // Owner problems take precedence; the service reports them.
        Err(_) if valid_owner(owner.as_deref()).is_none() => None,
        Err(e) => {
            tracing::warn!(user_id = owner.as_deref().unwrap_or_default(), "Record request body is malformed");
            return e.into_response();
        }
    };

    let service = state.service.clone();
    let result = run_blocking(Operation::Record, move || {
        service.record_observation(owner.as_deref(), input)
    })
    .await;

    match result {
        Ok(created) => (
            StatusCode::CREATED,
            [(header::LOCATION, RAIN_PATH)],
            Json(created),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Decode `{ "rain": <bool> }`. An empty body or a JSON `null` is absent.
fn decode_body(body: &[u8]) -> Result<Option<RainRecordInput>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<RainRecordInput>>(body)
        .map_err(|_| ApiError::bad_request(MALFORMED_BODY))
}

/// Run a store-touching service call off the async executor, inside the
/// caller's request span and subscriber.
async fn run_blocking<T, F>(op: Operation, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> RainResult<T> + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    let dispatch = tracing::dispatcher::get_default(|d| d.clone());

    let task = tokio::task::spawn_blocking(move || {
        tracing::dispatcher::with_default(&dispatch, || span.in_scope(f))
    });

    match task.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ApiError::from_rain(&e, op)),
        Err(join_err) => {
            tracing::error!(error = %join_err, operation = ?op, "Rain handler task failed");
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: op.server_error_message().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_absent_bodies() {
        assert_eq!(decode_body(b"").unwrap(), None);
        assert_eq!(decode_body(b"  \n").unwrap(), None);
        assert_eq!(decode_body(b"null").unwrap(), None);
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(
            decode_body(br#"{"rain": false}"#).unwrap(),
            Some(RainRecordInput { rain: false })
        );
    }

    #[test]
    fn test_decode_malformed() {
        for raw in [&b"{"[..], b"{}", br#"{"rain":1}"#, b"true", b"[]"] {
            let err = decode_body(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, MALFORMED_BODY);
        }
    }
}
