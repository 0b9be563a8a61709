//! StudentService - validation and store writes for student records.

use tracing::{debug, info};

use super::{
    ServiceError, Student, StudentForm, CLASS_REQUIRED, NAME_REQUIRED, NIM_REQUIRED, NIM_TAKEN,
};
use crate::document::{Collection, DocumentError, DocumentStore, DocumentsExt};
use crate::validation::{check, FieldError, ValidationErrors, Validator};

/// Applies create / update / delete to the student collection of a store.
///
/// Writes are validated first: every field must be non-empty and `nim` must
/// not belong to another record. The pre-check is advisory; the store's unique
/// constraint on `nim` decides, and its conflict is reported as the same field
/// error.
pub struct StudentService<S> {
    store: S,
}

impl<S: DocumentStore> StudentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn students(&self) -> Collection<'_, S, Student> {
        self.store.documents::<Student>()
    }

    /// All records in store order.
    pub fn list(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(self.students().all()?)
    }

    pub fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.students().count()?)
    }

    /// The record with this nim, if any.
    pub fn find(&self, nim: &str) -> Result<Option<Student>, ServiceError> {
        Ok(self.find_by_nim(nim)?)
    }

    /// The record with this nim, or `NotFound`.
    pub fn get(&self, nim: &str) -> Result<Student, ServiceError> {
        self.find(nim)?
            .ok_or_else(|| ServiceError::NotFound(nim.to_string()))
    }

    /// Validate `form` and insert a new record.
    pub fn create(&self, form: &StudentForm) -> Result<Student, ServiceError> {
        self.validate(form, None)?;

        let saved = self
            .students()
            .insert(form.to_student())
            .map_err(write_error)?;

        info!(id = %saved.id, nim = %saved.nim, "mahasiswa created");
        Ok(saved)
    }

    /// Validate `form` and replace every field of the record `id`.
    ///
    /// `old_nim` is the nim the record had when the edit began; submitting it
    /// unchanged never counts as a duplicate.
    pub fn update(
        &self,
        id: &str,
        old_nim: &str,
        form: &StudentForm,
    ) -> Result<Student, ServiceError> {
        if self.students().get(id)?.is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        self.validate(form, Some(old_nim))?;

        let mut student = form.to_student();
        student.id = id.to_string();
        let saved = self.students().replace(&student).map_err(write_error)?;

        info!(id = %saved.id, old_nim, nim = %saved.nim, "mahasiswa updated");
        Ok(saved)
    }

    /// Delete the record with this nim and return it.
    pub fn delete(&self, nim: &str) -> Result<Student, ServiceError> {
        let student = self.get(nim)?;

        if !self.students().delete(&student.id)? {
            // Removed between lookup and delete.
            return Err(ServiceError::NotFound(nim.to_string()));
        }

        info!(id = %student.id, nim, "mahasiswa deleted");
        Ok(student)
    }

    fn find_by_nim(&self, nim: &str) -> Result<Option<Student>, DocumentError> {
        self.students().find_one(&|s: &Student| s.nim == nim)
    }

    fn validate(&self, form: &StudentForm, old_nim: Option<&str>) -> Result<(), ServiceError> {
        let errors = self.validator(old_nim).run(form)?;
        if errors.is_empty() {
            return Ok(());
        }
        debug!(%errors, "mahasiswa form rejected");
        Err(ServiceError::Invalid(errors))
    }

    fn validator<'a>(
        &'a self,
        old_nim: Option<&'a str>,
    ) -> Validator<'a, StudentForm, DocumentError> {
        Validator::new()
            .check(check("nama", NAME_REQUIRED).not_empty())
            .check(
                check("nim", NIM_REQUIRED)
                    .not_empty()
                    .custom(move |nim, _| {
                        let taken = self.find_by_nim(nim)?.is_some();
                        let unchanged = old_nim == Some(nim);
                        Ok((taken && !unchanged).then(|| NIM_TAKEN.to_string()))
                    }),
            )
            .check(check("kelas", CLASS_REQUIRED).not_empty())
    }
}

/// Map a store write failure onto the service taxonomy.
fn write_error(err: DocumentError) -> ServiceError {
    match err {
        DocumentError::UniqueViolation { field, value, .. } => {
            let message = if field == "nim" {
                NIM_TAKEN.to_string()
            } else {
                format!("{} Sudah Ada", field)
            };
            ServiceError::Invalid(ValidationErrors::single(FieldError::new(
                field, message, value,
            )))
        }
        DocumentError::NotFound { id, .. } => ServiceError::NotFound(id),
        other => ServiceError::Store(other),
    }
}
