//! Response mapping.
//!
//! # Responsibilities
//! - Map handler errors to HTTP status codes and `{ "error": ... }` bodies
//!
//! # Design Decisions
//! - Client errors echo the validation message
//! - Server errors use a fixed message per operation; internal details stay in the logs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::rain::RainError;

/// Error body shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Which endpoint produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Record,
    List,
}

impl Operation {
    pub fn server_error_message(self) -> &'static str {
        match self {
            Operation::Record => "Internal server error occurred while recording data",
            Operation::List => "Internal server error occurred while retrieving data",
        }
    }
}

/// An error ready to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Translate a handler error raised by `op`.
    pub fn from_rain(err: &RainError, op: Operation) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: op.server_error_message().to_string(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_client_errors_keep_message() {
        let err = ApiError::from_rain(&RainError::InvalidOwner, Operation::List);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "x-userId header is required");

        let err = ApiError::from_rain(&RainError::MissingBody, Operation::Record);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Request body is required");
    }

    #[test]
    fn test_status_follows_error_class() {
        let errors = [
            RainError::InvalidOwner,
            RainError::MissingBody,
            RainError::Store(StoreError::Unavailable("down".into())),
        ];
        for err in &errors {
            let api = ApiError::from_rain(err, Operation::Record);
            assert_eq!(api.status.is_client_error(), err.is_client_error());
            assert_eq!(api.status.is_server_error(), !err.is_client_error());
        }
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let store_err = || RainError::Store(StoreError::Unavailable("secret path /var/x".into()));

        let err = ApiError::from_rain(&store_err(), Operation::Record);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error occurred while recording data");

        let err = ApiError::from_rain(&store_err(), Operation::List);
        assert_eq!(err.message, "Internal server error occurred while retrieving data");
        assert!(!err.message.contains("secret"));
    }
}
