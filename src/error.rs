use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::repository::RepositoryError;

/// One violated input field, reported under `detail` in a 422 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(ToString::to_string).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Note not found")]
    NotFound,

    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// The body could not be read at all; carries the rejection's own status.
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl ApiError {
    pub fn invalid(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(loc, msg, kind)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Note not found" }))).into_response()
            }
            Self::Validation(errors) => {
                tracing::debug!("rejected request: {:?}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": errors })),
                )
                    .into_response()
            }
            Self::Body { status, message } => {
                (status, Json(json!({ "detail": message }))).into_response()
            }
            Self::Storage(e) => {
                tracing::error!("storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Pulls the offending field name out of a serde message, if it names one.
///
/// Handles `missing field `title`` and the `title: invalid type ...` form that
/// axum produces from a serde path.
fn offending_field(message: &str) -> Option<&str> {
    let detail = ["target type: ", "query string: "]
        .iter()
        .find_map(|prefix| message.split_once(prefix).map(|(_, rest)| rest))
        .unwrap_or(message);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split('`').next();
    }

    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then_some(path)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => {
                return Self::Body {
                    status: rejection.status(),
                    message: rejection.body_text(),
                };
            }
        };
        let msg = rejection.body_text();

        match offending_field(&msg) {
            Some(field) => Self::invalid(&["body", field], msg.as_str(), kind),
            None => Self::invalid(&["body"], msg.as_str(), kind),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid(&["path", "id"], rejection.body_text(), "int_parsing")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let msg = rejection.body_text();
        match offending_field(&msg) {
            Some(field) => Self::invalid(&["query", field], msg.as_str(), "value_error"),
            None => Self::invalid(&["query"], msg.as_str(), "value_error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_field_name() {
        let msg = "Failed to deserialize the JSON body into the target type: \
                   missing field `title` at line 1 column 16";
        assert_eq!(offending_field(msg), Some("title"));
    }

    #[test]
    fn finds_field_from_serde_path() {
        let msg = "Failed to deserialize the JSON body into the target type: \
                   body: invalid type: integer `5`, expected a string at line 1 column 10";
        assert_eq!(offending_field(msg), Some("body"));
    }

    #[test]
    fn no_field_for_syntax_errors() {
        let msg = "Failed to parse the request body as JSON: expected value at line 1 column 1";
        assert_eq!(offending_field(msg), None);
    }

    #[test]
    fn validation_errors_serialize_with_type_key() {
        let err = FieldError::new(&["body", "title"], "may not be null", "null_value");
        let value = serde_json::to_value(err).unwrap();

        assert_eq!(
            value,
            json!({ "loc": ["body", "title"], "msg": "may not be null", "type": "null_value" })
        );
    }
}
