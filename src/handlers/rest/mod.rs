use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        ApiInfo, CreateNoteRequest, ListNotesQuery, MessageResponse, NoteResponse,
        UpdateNoteRequest,
    },
    error::ApiError,
    handlers::extract::{ValidJson, ValidPath, ValidQuery},
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        description = "A simple note-taking API with CRUD operations"
    ),
    paths(
        root,
        list_notes,
        get_note,
        create_note,
        update_note,
        delete_note
    ),
    components(schemas(
        ApiInfo,
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        MessageResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API information", body = ApiInfo)
    ),
    tag = "notes"
)]
pub async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Notes API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Notes ordered by id", body = Vec<NoteResponse>),
        (status = 422, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn list_notes(
    State(service): State<Arc<NoteService>>,
    ValidQuery(query): ValidQuery<ListNotesQuery>,
) -> Result<Response, ApiError> {
    let filter = query.into_filter()?;
    let notes = service.list_notes(&filter).await?;
    Ok((StatusCode::OK, Json(notes)).into_response())
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 422, description = "Invalid note ID"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note(
    State(service): State<Arc<NoteService>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Response, ApiError> {
    match service.get_note(id).await? {
        Some(note) => Ok((StatusCode::OK, Json(note)).into_response()),
        None => Err(ApiError::NotFound),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    ValidJson(payload): ValidJson<CreateNoteRequest>,
) -> Result<Response, ApiError> {
    let note = service.create_note(payload).await?;
    Ok((StatusCode::CREATED, Json(note)).into_response())
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<UpdateNoteRequest>,
) -> Result<Response, ApiError> {
    let changes = payload.into_changes()?;
    match service.update_note(id, changes).await? {
        Some(note) => Ok((StatusCode::OK, Json(note)).into_response()),
        None => Err(ApiError::NotFound),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found"),
        (status = 422, description = "Invalid note ID"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Response, ApiError> {
    if !service.delete_note(id).await? {
        return Err(ApiError::NotFound);
    }

    let message = MessageResponse {
        message: "Note deleted successfully".to_string(),
    };
    Ok((StatusCode::OK, Json(message)).into_response())
}
