//! Request extractors that reject with [`AppError`]
//!
//! axum's own `Json`, `Path` and `Query` answer a malformed request with a
//! plain-text 422. These wrappers route the rejection through `AppError`, so
//! every bad request gets a 400 and the JSON error body.

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON request body, also usable as a JSON response
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Field named by a JSON data error.
///
/// The rejection text reads `<summary>: <path>: <reason>`; the path is absent
/// when the body itself has the wrong shape.
fn json_error_field(text: &str) -> Option<&str> {
    let (_, detail) = text.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        None
    } else {
        Some(path)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = match &rejection {
            JsonRejection::JsonDataError(_) => json_error_field(&message).unwrap_or("body"),
            _ => "body",
        }
        .to_string();
        AppError::Validation { field, message }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        let field = match &rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::ParseErrorAtKey { key, .. } => key.clone(),
                _ => "path".to_string(),
            },
            _ => "path".to_string(),
        };
        AppError::Validation {
            field,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            field: "query".to_string(),
            message: rejection.body_text(),
        }
    }
}
