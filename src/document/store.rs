//! DocumentStore - Abstract CRUD storage for documents.

use super::{Document, DocumentError};

/// Abstract CRUD storage for documents.
///
/// Every method is scoped to the collection named by `M::COLLECTION`.
/// Implementations enforce the unique fields declared by
/// [`Document::unique_fields`] on `insert` and `replace`.
/// The `Collection` wrapper provides short names bound to one document type.
pub trait DocumentStore: Send + Sync {
    /// Get a document by ID. Returns None if not found.
    fn get<M: Document>(&self, id: &str) -> Result<Option<M>, DocumentError>;

    /// Insert a new document under a freshly assigned id and return it.
    fn insert<M: Document>(&self, document: M) -> Result<M, DocumentError>;

    /// Replace the document with the same id. Fails with `NotFound` if absent.
    fn replace<M: Document>(&self, document: &M) -> Result<M, DocumentError>;

    /// Delete a document by ID. Returns true if it existed.
    fn delete<M: Document>(&self, id: &str) -> Result<bool, DocumentError>;

    /// Find documents matching a predicate, in store order.
    fn find<M: Document>(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<M>, DocumentError>;

    /// Find the first document matching a predicate.
    fn find_one<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Option<M>, DocumentError>;

    /// Number of documents in the collection.
    fn count<M: Document>(&self) -> Result<usize, DocumentError>;

    /// Make every accepted write durable. No-op for volatile stores.
    fn flush(&self) -> Result<(), DocumentError> {
        Ok(())
    }
}
