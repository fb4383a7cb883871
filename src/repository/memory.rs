use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use super::{NoteRepository, RepositoryError};
use crate::models::{ListFilter, NewNote, Note, NoteChanges};

#[derive(Default)]
struct State {
    last_id: i64,
    notes: BTreeMap<i64, Note>,
}

/// In-process stand-in for [`super::PgNoteRepository`] with the same ordering,
/// search and id-assignment rules.
#[derive(Default)]
pub struct MemoryNoteRepository {
    state: tokio::sync::Mutex<State>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list_notes(&self, filter: &ListFilter) -> Result<Vec<Note>, RepositoryError> {
        let state = self.state.lock().await;
        let skip = usize::try_from(filter.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(usize::MAX);

        Ok(state
            .notes
            .values()
            .filter(|note| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|term| note.title.contains(term))
            })
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        Ok(self.state.lock().await.notes.get(&id).cloned())
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let mut state = self.state.lock().await;
        state.last_id += 1;

        let now = Utc::now();
        let note = Note {
            id: state.last_id,
            title: note.title,
            body: note.body,
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut state = self.state.lock().await;
        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(body) = changes.body {
            note.body = body;
        }
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str, body: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn all() -> ListFilter {
        ListFilter {
            skip: 0,
            limit: 100,
            search: None,
        }
    }

    #[tokio::test]
    async fn created_note_reads_back_equal() {
        let repo = MemoryNoteRepository::new();
        let created = repo
            .create_note(new_note("Groceries", "milk, eggs"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(repo.get_note(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryNoteRepository::new();
        let first = repo.create_note(new_note("a", "a")).await.unwrap();
        assert!(repo.delete_note(first.id).await.unwrap());

        let second = repo.create_note(new_note("b", "b")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_absent_not_errors() {
        let repo = MemoryNoteRepository::new();

        assert_eq!(repo.get_note(42).await.unwrap(), None);
        assert_eq!(
            repo.update_note(42, NoteChanges::default()).await.unwrap(),
            None
        );
        assert!(!repo.delete_note(42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_twice_reports_false_the_second_time() {
        let repo = MemoryNoteRepository::new();
        let note = repo.create_note(new_note("a", "b")).await.unwrap();

        assert!(repo.delete_note(note.id).await.unwrap());
        assert!(!repo.delete_note(note.id).await.unwrap());
        assert!(!repo.delete_note(note.id).await.unwrap());
    }

    #[tokio::test]
    async fn partial_update_only_touches_supplied_fields() {
        let repo = MemoryNoteRepository::new();
        let note = repo
            .create_note(new_note("Groceries", "milk, eggs"))
            .await
            .unwrap();

        let updated = repo
            .update_note(
                note.id,
                NoteChanges {
                    title: Some("X".to_string()),
                    body: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "X");
        assert_eq!(updated.body, "milk, eggs");

        let updated = repo
            .update_note(
                note.id,
                NoteChanges {
                    title: None,
                    body: Some(String::new()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "X");
        assert_eq!(updated.body, "");
    }

    #[tokio::test]
    async fn pagination_windows_id_order() {
        let repo = MemoryNoteRepository::new();
        for i in 0..5 {
            repo.create_note(new_note(&format!("note {i}"), ""))
                .await
                .unwrap();
        }

        let page = repo
            .list_notes(&ListFilter {
                skip: 1,
                limit: 2,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 3]);

        let tail = repo
            .list_notes(&ListFilter {
                skip: 4,
                limit: 10,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(tail.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5]);

        let past_end = repo
            .list_notes(&ListFilter {
                skip: 10,
                limit: 10,
                search: None,
            })
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn search_matches_title_substrings_only() {
        let repo = MemoryNoteRepository::new();
        repo.create_note(new_note("Groceries", "buy milk"))
            .await
            .unwrap();
        repo.create_note(new_note("Work", "groceries later"))
            .await
            .unwrap();
        repo.create_note(new_note("More groceries", ""))
            .await
            .unwrap();

        let found = repo
            .list_notes(&ListFilter {
                search: Some("roceries".to_string()),
                ..all()
            })
            .await
            .unwrap();
        assert_eq!(
            found.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(),
            vec!["Groceries", "More groceries"]
        );

        assert_eq!(repo.list_notes(&all()).await.unwrap().len(), 3);
    }
}
