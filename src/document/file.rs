//! FileDocumentStore - in-memory documents mirrored to a JSON snapshot file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::in_memory::{InMemoryDocumentStore, StoredDocument};
use super::{Document, DocumentError, DocumentStore};

const SNAPSHOT_FORMAT: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    format: u32,
    documents: HashMap<String, StoredDocument>,
}

/// Document store that keeps its working set in memory and rewrites a JSON
/// snapshot after every accepted mutation.
///
/// The snapshot is written to a sibling temporary file and renamed over the
/// target, so a crash leaves either the old or the new snapshot in place.
#[derive(Clone)]
pub struct FileDocumentStore {
    inner: InMemoryDocumentStore,
    path: Arc<PathBuf>,
    persist_lock: Arc<Mutex<()>>,
}

impl FileDocumentStore {
    /// Open the snapshot at `path`, starting empty when the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let raw = fs::read(&path)?;
            let snapshot: Snapshot = serde_json::from_slice(&raw)?;
            if snapshot.format != SNAPSHOT_FORMAT {
                return Err(DocumentError::Storage(format!(
                    "unsupported snapshot format {} in {}",
                    snapshot.format,
                    path.display()
                )));
            }
            tracing::debug!(
                path = %path.display(),
                documents = snapshot.documents.len(),
                "loaded document snapshot"
            );
            InMemoryDocumentStore::from_entries(snapshot.documents)
        } else {
            InMemoryDocumentStore::new()
        };

        Ok(Self {
            inner,
            path: Arc::new(path),
            persist_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, DocumentError> {
        self.persist_lock
            .lock()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    /// Write the snapshot. Callers hold the persist lock.
    fn persist(&self) -> Result<(), DocumentError> {
        let snapshot = Snapshot {
            format: SNAPSHOT_FORMAT,
            documents: self.inner.entries()?,
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.path.as_path())?;
        Ok(())
    }

    /// Persist the change just made to `id`, rolling the working set back to
    /// `previous` when the snapshot cannot be written.
    fn commit<M: Document>(
        &self,
        id: &str,
        previous: Option<StoredDocument>,
    ) -> Result<(), DocumentError> {
        if let Err(err) = self.persist() {
            tracing::warn!(
                path = %self.path.display(),
                collection = M::COLLECTION,
                id,
                error = %err,
                "snapshot write failed, change rolled back"
            );
            self.inner.restore::<M>(id, previous)?;
            return Err(err);
        }
        Ok(())
    }
}

impl DocumentStore for FileDocumentStore {
    fn get<M: Document>(&self, id: &str) -> Result<Option<M>, DocumentError> {
        self.inner.get(id)
    }

    fn insert<M: Document>(&self, document: M) -> Result<M, DocumentError> {
        let _guard = self.lock()?;
        let saved = self.inner.insert(document)?;
        self.commit::<M>(saved.id(), None)?;
        Ok(saved)
    }

    fn replace<M: Document>(&self, document: &M) -> Result<M, DocumentError> {
        let _guard = self.lock()?;
        let previous = self.inner.stored::<M>(document.id())?;
        let saved = self.inner.replace(document)?;
        self.commit::<M>(saved.id(), previous)?;
        Ok(saved)
    }

    fn delete<M: Document>(&self, id: &str) -> Result<bool, DocumentError> {
        let _guard = self.lock()?;
        let previous = self.inner.stored::<M>(id)?;
        let existed = self.inner.delete::<M>(id)?;
        if existed {
            self.commit::<M>(id, previous)?;
        }
        Ok(existed)
    }

    fn find<M: Document>(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<M>, DocumentError> {
        self.inner.find(predicate)
    }

    fn find_one<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Option<M>, DocumentError> {
        self.inner.find_one(predicate)
    }

    fn count<M: Document>(&self) -> Result<usize, DocumentError> {
        self.inner.count::<M>()
    }

    fn flush(&self) -> Result<(), DocumentError> {
        let _guard = self.lock()?;
        self.persist()
    }
}
