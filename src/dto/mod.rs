mod patch;

pub use patch::Patch;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, FieldError},
    models::{ListFilter, NewNote, Note, NoteChanges},
};

const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body
    pub body: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            body: note.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note body
    pub body: String,
}

impl From<CreateNoteRequest> for NewNote {
    fn from(request: CreateNoteRequest) -> Self {
        Self {
            title: request.title,
            body: request.body,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Updated title, omit to keep the current one
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    /// Updated body, omit to keep the current one
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub body: Patch<String>,
}

impl UpdateNoteRequest {
    /// Title and body are non-nullable, so an explicit `null` is rejected
    /// rather than read as "leave unchanged".
    pub fn into_changes(self) -> Result<NoteChanges, ApiError> {
        let mut errors = Vec::new();
        let mut field = |name: &str, value: Patch<String>| match value {
            Patch::Missing => None,
            Patch::Value(value) => Some(value),
            Patch::Null => {
                errors.push(FieldError::new(
                    &["body", name],
                    "Input should be a valid string",
                    "string_type",
                ));
                None
            }
        };

        let changes = NoteChanges {
            title: field("title", self.title),
            body: field("body", self.body),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Number of notes to skip
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub skip: i64,
    /// Maximum number of notes to return
    #[serde(default = "default_limit")]
    #[param(default = 100, minimum = 1)]
    pub limit: i64,
    /// Only return notes whose title contains this text
    pub search: Option<String>,
}

const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ListNotesQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl ListNotesQuery {
    pub fn into_filter(self) -> Result<ListFilter, ApiError> {
        let mut errors = Vec::new();
        if self.skip < 0 {
            errors.push(FieldError::new(
                &["query", "skip"],
                "Input should be greater than or equal to 0",
                "greater_than_equal",
            ));
        }
        if self.limit < 1 {
            errors.push(FieldError::new(
                &["query", "limit"],
                "Input should be greater than 0",
                "greater_than",
            ));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(ListFilter {
            skip: self.skip,
            limit: self.limit,
            search: self.search.filter(|term| !term.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}
