use crate::{
    dto::{CreateNoteRequest, NoteResponse},
    models::{ListFilter, NoteChanges},
    repository::{NoteRepository, RepositoryError},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_notes(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<NoteResponse>, RepositoryError> {
        self.repo
            .list_notes(filter)
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn get_note(&self, id: i64) -> Result<Option<NoteResponse>, RepositoryError> {
        self.repo
            .get_note(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, RepositoryError> {
        let note = self.repo.create_note(request.into()).await?;
        tracing::info!("Created note {}", note.id);
        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<NoteResponse>, RepositoryError> {
        self.repo
            .update_note(id, changes)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        let deleted = self.repo.delete_note(id).await?;
        if deleted {
            tracing::info!("Deleted note {}", id);
        }
        Ok(deleted)
    }
}
