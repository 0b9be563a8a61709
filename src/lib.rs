//! Mahasiswa: student record management over a pluggable document store.
//!
//! The crate is layered leaf-first:
//!
//! - [`document`](crate::DocumentStore): collection-oriented document stores
//!   (in-memory and JSON snapshot file) with store-enforced unique fields.
//! - [`validation`]: declarative field checks that collect every failure.
//! - [`StudentService`]: validates and applies create / update / delete.
//! - [`FlashStore`] and [`Session`]: one-shot notices carried across redirects.
//! - `web` (feature `http`): axum router rendering HTML pages.
//!
//! ## Example
//!
//! ```ignore
//! use mahasiswa::{InMemoryDocumentStore, StudentForm, StudentService};
//!
//! let service = StudentService::new(InMemoryDocumentStore::new());
//! let awi = service.create(&StudentForm::new("Awi", "123", "A"))?;
//! assert_eq!(service.get("123")?.id, awi.id);
//! ```

// Lets `#[derive(Document)]` name `mahasiswa::Document` inside this crate too.
extern crate self as mahasiswa;

mod context;
mod document;
mod session;
mod student;
pub mod validation;

#[cfg(feature = "http")]
mod config;
#[cfg(feature = "http")]
pub mod web;

pub use context::AppContext;
pub use document::{
    Collection, Document, DocumentError, DocumentStore, DocumentsExt, FileDocumentStore,
    InMemoryDocumentStore,
};
pub use mahasiswa_macros::Document;
pub use session::{FlashStore, Session, DEFAULT_FLASH_TTL, SESSION_COOKIE};
pub use student::{
    ServiceError, Student, StudentForm, StudentService, CLASS_REQUIRED, NAME_REQUIRED,
    NIM_REQUIRED, NIM_TAKEN,
};

#[cfg(feature = "http")]
pub use config::Config;
