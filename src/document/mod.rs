//! Documents - typed records kept in a collection-oriented document store.
//!
//! A document store is the persistence collaborator of the application: it
//! holds one collection per document type, assigns identifiers on insert and
//! answers predicate queries. Two backends ship with the crate:
//! [`InMemoryDocumentStore`] and the snapshot-backed [`FileDocumentStore`].
//!
//! ## Example
//!
//! ```ignore
//! use mahasiswa::{Document, DocumentsExt, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone, Document)]
//! #[document(collection = "mahasiswas")]
//! struct Student {
//!     #[document(id)]
//!     pub id: String,
//!     #[document(unique)]
//!     pub nim: String,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! let saved = store.documents::<Student>().insert(student)?;
//! let loaded = store.documents::<Student>().find_one(&|s| s.nim == "123")?;
//! ```

mod collection;
mod file;
mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be stored as documents.
///
/// Usually derived with `#[derive(Document)]`.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g. "mahasiswas").
    const COLLECTION: &'static str;

    /// Returns the store-assigned identifier. Empty before the first insert.
    fn id(&self) -> &str;

    /// Overwrite the identifier. Called by the store on insert.
    fn assign_id(&mut self, id: String);

    /// Field name / value pairs that must stay unique within the collection.
    fn unique_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Another document in the collection already holds this unique value.
    #[error("unique constraint violated on {collection}.{field} (value {value:?})")]
    UniqueViolation {
        collection: String,
        field: String,
        value: String,
    },
    /// No document with this id.
    #[error("document not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Storage-level error (poisoned lock and the like).
    #[error("document storage error: {0}")]
    Storage(String),
    /// Snapshot file could not be read or written.
    #[error("document snapshot io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::Io(err.to_string())
    }
}

pub use collection::{Collection, DocumentsExt};
pub use file::FileDocumentStore;
pub use in_memory::InMemoryDocumentStore;
pub use store::DocumentStore;
