use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

/// Fields to overwrite on an existing note. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Offset/limit window over notes ordered by id, optionally narrowed to titles
/// containing `search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub skip: i64,
    pub limit: i64,
    pub search: Option<String>,
}
