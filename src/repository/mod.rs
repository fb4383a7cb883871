mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::{Database, PgNoteRepository};

use async_trait::async_trait;

use crate::models::{ListFilter, NewNote, Note, NoteChanges};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Persistence for notes. A missing note is reported as `None`/`false`, never as an error.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn list_notes(&self, filter: &ListFilter) -> Result<Vec<Note>, RepositoryError>;

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError>;

    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError>;

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError>;
}
