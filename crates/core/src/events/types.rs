use serde::{Deserialize, Serialize};

use crate::book::{Book, BookId, BookPatch};

/// Default topic change events are published to.
pub const BOOK_EVENTS_TOPIC: &str = "book_events";

/// A change notification emitted after a committed store mutation.
///
/// The wire format keeps the upper-case keys downstream consumers already
/// parse:
///
/// ```json
/// {"event":"CREATE","ID":1,"TITLE":"Dune","AUTHOR":"Herbert","YEAR":1965}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "UPPERCASE")]
pub enum BookEvent {
    #[serde(rename_all = "UPPERCASE")]
    Create {
        id: BookId,
        title: String,
        author: String,
        year: i32,
    },
    /// Only the fields the update supplied are present.
    #[serde(rename_all = "UPPERCASE")]
    Update {
        id: BookId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<i32>,
    },
    #[serde(rename_all = "UPPERCASE")]
    Delete { id: BookId },
}

impl BookEvent {
    pub fn created(book: &Book) -> Self {
        Self::Create {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
        }
    }

    pub fn updated(id: BookId, patch: &BookPatch) -> Self {
        Self::Update {
            id,
            title: patch.title.clone(),
            author: patch.author.clone(),
            year: patch.year,
        }
    }

    pub fn deleted(id: BookId) -> Self {
        Self::Delete { id }
    }

    /// Returns the ID of the book the event is about.
    pub fn book_id(&self) -> BookId {
        match self {
            Self::Create { id, .. } | Self::Update { id, .. } | Self::Delete { id } => *id,
        }
    }

    /// Returns the wire name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CREATE",
            Self::Update { .. } => "UPDATE",
            Self::Delete { .. } => "DELETE",
        }
    }
}
