//! Application context shared by every request handler.
//!
//! Owns the student service (and through it the document store) and the
//! flash store. Built once at startup and closed after the server stops, so
//! no connection or session state lives in globals.

use std::time::Duration;

use tracing::info;

use crate::document::{DocumentError, DocumentStore};
use crate::session::FlashStore;
use crate::student::StudentService;

/// Everything a request needs, constructed explicitly by the binary or tests.
///
/// ## Example
///
/// ```ignore
/// let ctx = Arc::new(AppContext::new(InMemoryDocumentStore::new(), DEFAULT_FLASH_TTL));
/// let app = web::router(ctx.clone());
/// // ... serve ...
/// ctx.close()?;
/// ```
pub struct AppContext<S> {
    service: StudentService<S>,
    flash: FlashStore,
}

impl<S: DocumentStore> AppContext<S> {
    pub fn new(store: S, flash_ttl: Duration) -> Self {
        Self {
            service: StudentService::new(store),
            flash: FlashStore::new(flash_ttl),
        }
    }

    pub fn service(&self) -> &StudentService<S> {
        &self.service
    }

    pub fn flash(&self) -> &FlashStore {
        &self.flash
    }

    /// Flush the store. Call once the server has stopped accepting requests.
    pub fn close(&self) -> Result<(), DocumentError> {
        self.service.store().flush()?;
        info!("document store flushed");
        Ok(())
    }
}
