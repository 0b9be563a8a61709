//! Collection - Typed accessor for document CRUD operations.

use std::marker::PhantomData;

use super::{Document, DocumentError, DocumentStore};

/// Typed wrapper for accessing the documents of a single type.
///
/// Lets call sites name the document type once instead of turbofishing every
/// `DocumentStore` call.
pub struct Collection<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: DocumentStore, M: Document> Collection<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a document by ID.
    pub fn get(&self, id: &str) -> Result<Option<M>, DocumentError> {
        self.store.get(id)
    }

    /// Insert a new document; the returned copy carries its assigned id.
    pub fn insert(&self, document: M) -> Result<M, DocumentError> {
        self.store.insert(document)
    }

    /// Replace an existing document by its id.
    pub fn replace(&self, document: &M) -> Result<M, DocumentError> {
        self.store.replace(document)
    }

    /// Delete a document by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, DocumentError> {
        self.store.delete::<M>(id)
    }

    /// All documents in store order.
    pub fn all(&self) -> Result<Vec<M>, DocumentError> {
        self.store.find(&|_: &M| true)
    }

    /// Find the first document matching a predicate.
    pub fn find_one(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Option<M>, DocumentError> {
        self.store.find_one(predicate)
    }

    /// Number of documents in the collection.
    pub fn count(&self) -> Result<usize, DocumentError> {
        self.store.count::<M>()
    }
}

/// Extension trait for typed document access on any DocumentStore.
pub trait DocumentsExt: DocumentStore + Sized {
    /// Get a typed collection accessor.
    fn documents<M: Document>(&self) -> Collection<'_, Self, M> {
        Collection::new(self)
    }
}

impl<S: DocumentStore> DocumentsExt for S {}
