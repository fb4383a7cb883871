use async_trait::async_trait;
use tokio_postgres::{Client, Config, NoTls, Row};

use super::{NoteRepository, RepositoryError, embedded::migrations};
use crate::models::{ListFilter, NewNote, Note, NoteChanges};

const NOTE_COLUMNS: &str = "id, title, body, created_at, updated_at";

/// Handle to the PostgreSQL engine. Holds connection settings only; every
/// unit of work opens its own [`Session`].
#[derive(Debug, Clone)]
pub struct Database {
    config: Config,
}

/// A single database connection, closed when the session is dropped.
pub struct Session {
    client: Client,
}

impl Database {
    pub fn new(database_dsn: &str) -> Result<Self, RepositoryError> {
        let config = database_dsn.parse::<Config>()?;
        Ok(Self { config })
    }

    pub async fn acquire(&self) -> Result<Session, RepositoryError> {
        let (client, con) = self.config.connect(NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        tracing::debug!("database session acquired");

        Ok(Session { client })
    }

    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        let mut session = self.acquire().await?;
        let migrations_report = migrations::runner()
            .run_async(&mut session.client)
            .await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!("database session released");
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Session {
    pub async fn list_notes(&self, filter: &ListFilter) -> Result<Vec<Note>, RepositoryError> {
        // strpos keeps the match literal; LIKE would treat % and _ in the term as wildcards
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE $1::TEXT IS NULL OR strpos(title, $1) > 0 \
             ORDER BY id OFFSET $2 LIMIT $3"
        );
        let rows = self
            .client
            .query(
                &query,
                &[&filter.search.as_deref(), &filter.skip, &filter.limit],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    pub async fn get_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let row = self
            .client
            .query_one(
                &format!("INSERT INTO notes (title, body) VALUES ($1, $2) RETURNING {NOTE_COLUMNS}"),
                &[&note.title, &note.body],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    pub async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE notes SET \
                     title = COALESCE($2, title), \
                     body = COALESCE($3, body), \
                     updated_at = now() \
                     WHERE id = $1 RETURNING {NOTE_COLUMNS}"
                ),
                &[&id, &changes.title, &changes.body],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}

/// [`NoteRepository`] backed by PostgreSQL, one session per call.
pub struct PgNoteRepository {
    db: Database,
}

impl PgNoteRepository {
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list_notes(&self, filter: &ListFilter) -> Result<Vec<Note>, RepositoryError> {
        self.db.acquire().await?.list_notes(filter).await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        self.db.acquire().await?.get_note(id).await
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        self.db.acquire().await?.create_note(note).await
    }

    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        self.db.acquire().await?.update_note(id, changes).await
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        self.db.acquire().await?.delete_note(id).await
    }
}
