//! InMemoryDocumentStore - HashMap-backed document store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentError, DocumentStore};

/// Internal stored representation of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredDocument {
    /// Insertion sequence; `find` answers in this order.
    pub seq: u64,
    pub body: Value,
    /// Unique field values captured at write time.
    #[serde(default)]
    pub unique: Vec<(String, String)>,
}

#[derive(Default)]
struct Storage {
    documents: HashMap<String, StoredDocument>,
    next_seq: u64,
}

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc: clones share the
/// same documents.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<Storage>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Storage::default())),
        }
    }

    /// Rebuild a store from previously exported entries.
    pub(crate) fn from_entries(entries: HashMap<String, StoredDocument>) -> Self {
        let next_seq = entries.values().map(|d| d.seq + 1).max().unwrap_or(0);
        Self {
            storage: Arc::new(RwLock::new(Storage {
                documents: entries,
                next_seq,
            })),
        }
    }

    /// Copy of every stored entry, keyed like the live storage.
    pub(crate) fn entries(&self) -> Result<HashMap<String, StoredDocument>, DocumentError> {
        Ok(self.read()?.documents.clone())
    }

    /// The stored entry for `id` in `M`'s collection, if any.
    pub(crate) fn stored<M: Document>(
        &self,
        id: &str,
    ) -> Result<Option<StoredDocument>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        Ok(self.read()?.documents.get(&key).cloned())
    }

    /// Put the entry for `id` back to `previous`, removing it when `None`.
    pub(crate) fn restore<M: Document>(
        &self,
        id: &str,
        previous: Option<StoredDocument>,
    ) -> Result<(), DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;
        match previous {
            Some(stored) => storage.documents.insert(key, stored),
            None => storage.documents.remove(&key),
        };
        Ok(())
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, DocumentError> {
        self.storage
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, DocumentError> {
        self.storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    /// Documents of one collection, in insertion order.
    fn scan<'s>(storage: &'s Storage, collection: &str) -> Vec<(&'s String, &'s StoredDocument)> {
        let prefix = format!("{}:", collection);
        let mut docs: Vec<_> = storage
            .documents
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();
        docs.sort_by_key(|(_, stored)| stored.seq);
        docs
    }

    /// Reject the write if another document of the collection holds one of
    /// `unique`'s values.
    fn check_unique(
        storage: &Storage,
        collection: &str,
        own_key: &str,
        unique: &[(String, String)],
    ) -> Result<(), DocumentError> {
        if unique.is_empty() {
            return Ok(());
        }
        for (key, stored) in Self::scan(storage, collection) {
            if key == own_key {
                continue;
            }
            if let Some((field, value)) = unique.iter().find(|pair| stored.unique.contains(*pair)) {
                return Err(DocumentError::UniqueViolation {
                    collection: collection.to_string(),
                    field: field.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    fn unique_of<M: Document>(document: &M) -> Vec<(String, String)> {
        document
            .unique_fields()
            .into_iter()
            .map(|(field, value)| (field.to_string(), value))
            .collect()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get<M: Document>(&self, id: &str) -> Result<Option<M>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.documents.get(&key) {
            Some(stored) => Ok(Some(serde_json::from_value(stored.body.clone())?)),
            None => Ok(None),
        }
    }

    fn insert<M: Document>(&self, mut document: M) -> Result<M, DocumentError> {
        document.assign_id(Uuid::new_v4().simple().to_string());
        let key = Self::make_key(M::COLLECTION, document.id());
        let body = serde_json::to_value(&document)?;
        let unique = Self::unique_of(&document);

        let mut storage = self.write()?;
        Self::check_unique(&storage, M::COLLECTION, &key, &unique)?;

        let seq = storage.next_seq;
        storage.next_seq += 1;
        storage
            .documents
            .insert(key, StoredDocument { seq, body, unique });

        Ok(document)
    }

    fn replace<M: Document>(&self, document: &M) -> Result<M, DocumentError> {
        let key = Self::make_key(M::COLLECTION, document.id());
        let body = serde_json::to_value(document)?;
        let unique = Self::unique_of(document);

        let mut storage = self.write()?;
        let seq = storage
            .documents
            .get(&key)
            .map(|stored| stored.seq)
            .ok_or_else(|| DocumentError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: document.id().to_string(),
            })?;
        Self::check_unique(&storage, M::COLLECTION, &key, &unique)?;

        storage
            .documents
            .insert(key, StoredDocument { seq, body, unique });

        Ok(document.clone())
    }

    fn delete<M: Document>(&self, id: &str) -> Result<bool, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;

        Ok(storage.documents.remove(&key).is_some())
    }

    fn find<M: Document>(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<M>, DocumentError> {
        let storage = self.read()?;
        let mut results = Vec::new();

        for (_, stored) in Self::scan(&storage, M::COLLECTION) {
            let data: M = serde_json::from_value(stored.body.clone())?;
            if predicate(&data) {
                results.push(data);
            }
        }

        Ok(results)
    }

    fn find_one<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Option<M>, DocumentError> {
        let storage = self.read()?;

        for (_, stored) in Self::scan(&storage, M::COLLECTION) {
            let data: M = serde_json::from_value(stored.body.clone())?;
            if predicate(&data) {
                return Ok(Some(data));
            }
        }

        Ok(None)
    }

    fn count<M: Document>(&self) -> Result<usize, DocumentError> {
        let storage = self.read()?;
        Ok(Self::scan(&storage, M::COLLECTION).len())
    }
}
