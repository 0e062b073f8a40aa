use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::core::SweeperError;

pub struct ApiError(pub SweeperError);

impl From<SweeperError> for ApiError {
    fn from(err: SweeperError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SweeperError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            SweeperError::UnsupportedFormat(_)
            | SweeperError::ParseError { .. }
            | SweeperError::InvalidFillTarget { .. }
            | SweeperError::UnknownColumn(_)
            | SweeperError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SweeperError::EncodingError(_)
            | SweeperError::IoError(_)
            | SweeperError::ConfigParsingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}
