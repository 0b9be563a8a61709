//! Validation - declarative field rules applied to form input before a write.
//!
//! A [`Validator`] is a list of field [`Check`]s. Each check names a field,
//! carries the message reported when a presence rule fails, and chains any
//! number of rules. Every rule of every check runs; failures are collected in
//! declaration order rather than stopping at the first one.
//!
//! ```ignore
//! let errors = Validator::new()
//!     .check(check("nama", "Nama Tidak Boleh Kosong").not_empty())
//!     .check(
//!         check("nim", "NIM Tidak Boleh Kosong")
//!             .not_empty()
//!             .custom(|nim, _| Ok(taken(nim).then(|| "NIM Sudah Ada".to_string()))),
//!     )
//!     .run(&form)?;
//! ```

mod check;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

pub use check::{check, Check, Validator};

/// Read access to named input fields.
pub trait Fields {
    /// The raw value of `name`, or None when the input lacks the field.
    fn field(&self, name: &str) -> Option<&str>;
}

impl Fields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A single rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// The submitted value that failed.
    pub value: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: value.into(),
        }
    }
}

/// Ordered collection of field errors from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding exactly one failure.
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Failures reported for `field`.
    pub fn for_field<'s>(&'s self, field: &'s str) -> impl Iterator<Item = &'s FieldError> + 's {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// True when `field` failed with exactly `message`.
    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.for_field(field).any(|e| e.message == message)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
