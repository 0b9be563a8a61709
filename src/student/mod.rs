//! Students - the "Mahasiswa" record, its form input and the service that
//! validates and applies writes.

mod error;
mod service;

use serde::{Deserialize, Serialize};

use crate::validation::Fields;
use crate::Document;

pub use error::ServiceError;
pub use service::StudentService;

pub const NAME_REQUIRED: &str = "Nama Tidak Boleh Kosong";
pub const NIM_REQUIRED: &str = "NIM Tidak Boleh Kosong";
pub const NIM_TAKEN: &str = "NIM Sudah Ada";
pub const CLASS_REQUIRED: &str = "Kelas Tidak Boleh Kosong";

/// A student record.
///
/// `id` is assigned by the document store on insert and never changes;
/// `nim` is the human-facing key and is kept unique by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "mahasiswas")]
pub struct Student {
    #[serde(rename = "_id", default)]
    #[document(id)]
    pub id: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[document(unique)]
    pub nim: String,
    #[serde(rename = "kelas")]
    pub class_name: String,
}

impl Student {
    /// A record not yet stored (empty id).
    pub fn new(
        name: impl Into<String>,
        nim: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            nim: nim.into(),
            class_name: class_name.into(),
        }
    }
}

/// Raw urlencoded form submission for create, edit and delete.
///
/// Absent text fields decode as empty strings so presence rules see them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "oldNim", skip_serializing_if = "Option::is_none")]
    pub old_nim: Option<String>,
    #[serde(rename = "nama")]
    pub name: String,
    pub nim: String,
    #[serde(rename = "kelas")]
    pub class_name: String,
}

impl StudentForm {
    pub fn new(
        name: impl Into<String>,
        nim: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            nim: nim.into(),
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Attach the record id and the nim the record had when the edit began.
    pub fn editing(mut self, id: impl Into<String>, old_nim: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self.old_nim = Some(old_nim.into());
        self
    }

    /// Pre-filled edit form for a stored record.
    pub fn from_student(student: &Student) -> Self {
        Self::new(&student.name, &student.nim, &student.class_name)
            .editing(&student.id, &student.nim)
    }

    /// The record these fields describe, without an id.
    pub fn to_student(&self) -> Student {
        Student::new(&self.name, &self.nim, &self.class_name)
    }
}

impl Fields for StudentForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "_id" => self.id.as_deref(),
            "oldNim" => self.old_nim.as_deref(),
            "nama" => Some(&self.name),
            "nim" => Some(&self.nim),
            "kelas" => Some(&self.class_name),
            _ => None,
        }
    }
}
